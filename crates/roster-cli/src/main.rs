//! Roster CLI
//!
//! Command-line tool for joining a student list with student notes, editing
//! the merged records and exporting the result.

use clap::{Parser, Subcommand};
use roster_core::{
    join_files, run, run_job, sorted_records, Edit, Field, JobFile, OutputFormat, PatchFile,
    PipelineReport,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Join, edit and export student roster tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join list and notes, apply edits and write the result
    Join {
        /// Student list CSV (StudentID, FirstName, LastName, Certificate)
        #[arg(short, long)]
        list: PathBuf,

        /// Student notes CSV (StudentID, Note1, Note2, ...)
        #[arg(short, long)]
        notes: PathBuf,

        /// Output file path (replaced if it exists)
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (csv or json)
        #[arg(long, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Edits to apply (id:field:value)
        #[arg(short, long)]
        edit: Vec<String>,

        /// Patch file (JSON) with more edits, applied after --edit
        #[arg(short, long)]
        patch: Option<PathBuf>,
    },

    /// Print joined records in ascending ID order
    Show {
        #[arg(short, long)]
        list: PathBuf,

        #[arg(short, long)]
        notes: PathBuf,

        /// Only print these IDs
        #[arg(long)]
        id: Vec<i64>,

        /// Maximum number of records to display
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print a single field of a joined record
    Get {
        #[arg(short, long)]
        list: PathBuf,

        #[arg(short, long)]
        notes: PathBuf,

        /// Student ID
        #[arg(long)]
        id: i64,

        /// Field name (FirstName, LastName, Certificate, Notes)
        #[arg(short, long)]
        field: String,
    },

    /// Run a job file
    Run {
        /// Path to job file (JSON)
        #[arg(short, long)]
        job: PathBuf,
    },

    /// Create a job file template
    CreateJob {
        /// Output path for the job file
        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long)]
        list: PathBuf,

        #[arg(short, long)]
        notes: PathBuf,

        /// Result file the job will write
        #[arg(long)]
        result: PathBuf,

        /// Example edits to include (id:field:value)
        #[arg(short, long)]
        edit: Vec<String>,
    },
}

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dispatch() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch() -> roster_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Join {
            list,
            notes,
            output,
            format,
            edit,
            patch,
        } => cmd_join(&list, &notes, &output, format, &edit, patch.as_deref()),
        Commands::Show {
            list,
            notes,
            id,
            limit,
        } => cmd_show(&list, &notes, &id, limit),
        Commands::Get {
            list,
            notes,
            id,
            field,
        } => cmd_get(&list, &notes, id, &field),
        Commands::Run { job } => cmd_run(&job),
        Commands::CreateJob {
            output,
            list,
            notes,
            result,
            edit,
        } => cmd_create_job(&output, list, notes, result, &edit),
    }
}

fn parse_edits(raw: &[String]) -> roster_core::Result<Vec<Edit>> {
    raw.iter().map(|s| Edit::parse(s)).collect()
}

fn cmd_join(
    list: &Path,
    notes: &Path,
    output: &Path,
    format: OutputFormat,
    raw_edits: &[String],
    patch_path: Option<&Path>,
) -> roster_core::Result<()> {
    let mut patch = PatchFile::from(parse_edits(raw_edits)?);
    if let Some(path) = patch_path {
        patch.edits.extend(PatchFile::load(path)?.edits);
    }

    let report = run(list, notes, &patch, output, format)?;
    print_report(&report, output);

    Ok(())
}

fn cmd_show(list: &Path, notes: &Path, ids: &[i64], limit: Option<usize>) -> roster_core::Result<()> {
    let records = join_files(list, notes)?;

    if !ids.is_empty() {
        for id in ids {
            match records.get(id) {
                Some(record) => println!("{}", record),
                None => println!("StudentID: {} not found", id),
            }
        }
        return Ok(());
    }

    let sorted = sorted_records(&records);
    let row_limit = limit.unwrap_or(sorted.len());
    for record in sorted.iter().take(row_limit) {
        println!("{}", record);
    }

    if sorted.len() > row_limit {
        println!("... ({} more records)", sorted.len() - row_limit);
    }

    Ok(())
}

fn cmd_get(list: &Path, notes: &Path, id: i64, field: &str) -> roster_core::Result<()> {
    let records = join_files(list, notes)?;

    let record = records
        .get(&id)
        .ok_or(roster_core::Error::RecordNotFound(id))?;
    let field: Field = field.parse()?;

    println!("{}", record.get(field));

    Ok(())
}

fn cmd_run(job_path: &Path) -> roster_core::Result<()> {
    let job = JobFile::load(job_path)?;
    println!(
        "Loaded job: {} + {} -> {} ({}, {} edits)",
        job.list.display(),
        job.notes.display(),
        job.output.display(),
        job.format,
        job.edits.len()
    );

    let report = run_job(&job)?;
    print_report(&report, &job.output);

    Ok(())
}

fn cmd_create_job(
    output: &Path,
    list: PathBuf,
    notes: PathBuf,
    result: PathBuf,
    raw_edits: &[String],
) -> roster_core::Result<()> {
    let mut job = JobFile::new(list, notes, result);
    job.edits = parse_edits(raw_edits)?;

    job.save(output)?;
    println!("Created job file: {}", output.display());
    println!();
    println!("Edit the file to configure your job, then run:");
    println!("  roster run --job {}", output.display());

    Ok(())
}

fn print_report(report: &PipelineReport, output: &Path) {
    if !report.patch.failed_edits.is_empty() {
        println!(
            "Warning: {} edits could not be applied:",
            report.patch.failed_edits.len()
        );
        for (edit, reason) in &report.patch.failed_edits {
            println!("  - Student {}, field '{}': {}", edit.id, edit.field, reason);
        }
        println!();
    }

    println!(
        "Wrote {} records to {} ({} edits applied)",
        report.records.len(),
        output.display(),
        report.patch.edits_applied
    );
}
