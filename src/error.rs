use thiserror::Error;

/// Domain-specific errors for the scheduler
#[derive(Error, Debug)]
pub enum SchedulerError {
    // Input/Parse errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    #[error("Duplicate ID found: {id_type} '{id}'")]
    DuplicateId { id_type: String, id: String },

    #[error("curriculum edge for section '{section_id}' references unknown {what} '{id}'")]
    UnknownReference {
        section_id: String,
        what: String,
        id: String,
    },

    #[error("section '{section_id}' and subject '{subject_id}' appear on more than one curriculum edge")]
    DuplicateCurriculumEdge {
        section_id: String,
        subject_id: String,
    },

    // Pre-run validation errors (fatal, reported before any evolution starts)
    #[error(
        "subject '{subject_id}' has kind {kind} and blockSize {block_size} with requiredPeriodsPerWeek {required}: \
         LAB requires blockSize >= 2 and requiredPeriodsPerWeek divisible by blockSize; THEORY requires blockSize == 1"
    )]
    InvalidLabConfig {
        subject_id: String,
        kind: String,
        block_size: u32,
        required: u32,
    },

    #[error("scheduling input is missing required data: {0}")]
    EmptyInput(String),

    #[error("no usable time slots in the catalog")]
    NoUsableSlots,

    #[error("no room of any kind in the input")]
    NoRoomOfAnyKind,
}

/// Use anyhow::Result at application boundaries
pub type Result<T> = anyhow::Result<T>;
