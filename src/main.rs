use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use timetable_ga::parser::{load_input_from_dir, validate_input};
use timetable_ga::reporter::{
    faculty_extract, generate_json_summary, generate_reports, print_summary, section_extract,
    OutputFormat,
};
use timetable_ga::scheduler::{run_scheduler, GaParams};
use timetable_ga::types::{FacultyId, SectionId};

#[derive(Parser)]
#[command(name = "timetable-ga")]
#[command(about = "Genetic-algorithm weekly timetable scheduler")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the GA against an input directory and write a report
    Run {
        /// Directory containing sections.json, subjects.json, rooms.json,
        /// faculty.json, curriculum.json, and an optional config.toml
        #[arg(short, long)]
        data: PathBuf,

        /// Directory for report output
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Optional TOML file with a `[ga]` table of GA parameters
        #[arg(long)]
        ga_config: Option<PathBuf>,

        /// Suppress progress output, print a JSON summary only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate an input directory's cross-references without running the GA
    Validate {
        /// Directory containing input JSON files
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Extract a per-section or per-faculty schedule from a run's JSON report
    Report {
        /// Path to a schedule.json file produced by `run`
        #[arg(short, long)]
        result: PathBuf,

        /// Directory containing the same input data used for the run
        #[arg(short, long)]
        data: PathBuf,

        /// Print the schedule for this section id
        #[arg(long)]
        section: Option<String>,

        /// Print the schedule for this faculty id
        #[arg(long)]
        faculty: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            output,
            format,
            ga_config,
            quiet,
        } => run_run(&data, &output, &format, ga_config.as_deref(), quiet),
        Commands::Validate { data } => run_validate(&data),
        Commands::Report {
            result,
            data,
            section,
            faculty,
        } => run_report(&result, &data, section, faculty),
    }
}

fn run_run(
    data: &PathBuf,
    output: &PathBuf,
    format: &str,
    ga_config: Option<&std::path::Path>,
    quiet: bool,
) -> Result<()> {
    let input = load_input_from_dir(data).context("failed to load input data")?;
    validate_input(&input).context("input failed cross-reference validation")?;

    let params = match ga_config {
        Some(path) => load_ga_params(path)?,
        None => GaParams::default(),
    };

    if !quiet {
        println!(
            "Loaded {} sections, {} subjects, {} rooms, {} faculty",
            input.sections.len(),
            input.subjects.len(),
            input.rooms.len(),
            input.faculty.len()
        );
    }

    let bar = if quiet {
        None
    } else {
        let bar = ProgressBar::new(params.generations as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} [{bar:40.cyan/blue}] gen {pos}/{len} best fitness {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    };

    let progress_closure = bar.as_ref().map(|bar| {
        move |generation: usize, fitness: i64| {
            bar.set_position(generation as u64);
            bar.set_message(fitness.to_string());
        }
    });
    let progress: Option<&dyn Fn(usize, i64)> =
        progress_closure.as_ref().map(|f| f as &dyn Fn(usize, i64));

    let result = run_scheduler(&input, &params, Arc::new(AtomicBool::new(false)), progress)?;

    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }

    let formats = parse_formats(format);
    generate_reports(&result, &input, output, &formats)?;

    if quiet {
        println!("{}", generate_json_summary(&result)?);
    } else {
        print_summary(&result);
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn run_validate(data: &PathBuf) -> Result<()> {
    let input = load_input_from_dir(data).context("failed to load input data")?;
    match validate_input(&input) {
        Ok(()) => {
            println!("{}", "✓ Input is well-formed".green().bold());
            Ok(())
        }
        Err(err) => {
            println!("{}", "✗ Input failed validation".red().bold());
            println!("  {}", err);
            Err(err)
        }
    }
}

fn run_report(
    result_path: &PathBuf,
    data: &PathBuf,
    section: Option<String>,
    faculty: Option<String>,
) -> Result<()> {
    let input = load_input_from_dir(data).context("failed to load input data")?;
    let result_json = std::fs::read_to_string(result_path)
        .with_context(|| format!("failed to read {}", result_path.display()))?;
    let result: timetable_ga::scheduler::RunResult = serde_json::from_str(&result_json)?;

    if let Some(section_id) = section {
        match section_extract(&result, &input, &SectionId(section_id)) {
            Some(extract) => println!("{}", extract),
            None => println!("Section not found"),
        }
    } else if let Some(faculty_id) = faculty {
        match faculty_extract(&result, &input, &FacultyId(faculty_id)) {
            Some(extract) => println!("{}", extract),
            None => println!("Faculty not found"),
        }
    } else {
        print_summary(&result);
    }

    Ok(())
}

fn load_ga_params(path: &std::path::Path) -> Result<GaParams> {
    #[derive(serde::Deserialize)]
    struct GaConfigFile {
        #[serde(default)]
        ga: GaParams,
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed: GaConfigFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(parsed.ga)
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format == "all" {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }

    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}
