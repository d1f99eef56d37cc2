//! Weekly timetable genetic-algorithm scheduler.
//!
//! Assigns a set of required teaching sessions (section × subject ×
//! faculty) to (room, starting time slot) pairs so that hard institutional
//! constraints are never violated and soft quality metrics are minimized.
//!
//! # Pipeline
//!
//! 1. **Demand expansion** (`scheduler::demand`): curriculum edges plus
//!    per-subject period counts become the multiset of sessions to place.
//! 2. **Initialization** (`scheduler::initializer`): a random, locally
//!    feasible starting chromosome per population member.
//! 3. **Evolution** (`scheduler::ga`): elitism, tournament selection,
//!    section-wise crossover, and conflict-aware mutation, evaluated in
//!    parallel each generation via `validator::evaluate`.
//! 4. **Encoding** (`scheduler::encoder`): the best chromosome flattened to
//!    a row list for reporting or persistence.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//! use std::path::Path;
//! use timetable_ga::parser::{load_input_from_dir, validate_input};
//! use timetable_ga::scheduler::{run_scheduler, GaParams};
//!
//! let input = load_input_from_dir(Path::new("./data/demo")).unwrap();
//! validate_input(&input).unwrap();
//! let result = run_scheduler(&input, &GaParams::default(), Arc::new(AtomicBool::new(false)), None).unwrap();
//! println!("Fitness: {}", result.fitness);
//! ```

pub mod error;
pub mod parser;
pub mod reporter;
pub mod scheduler;
pub mod types;
pub mod validator;

pub use error::{Result, SchedulerError};
