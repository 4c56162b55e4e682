//! Table Pruner CLI
//!
//! Command-line tool for removing rows from CSV/TSV tables whose value in one
//! column appears in an exclusion list.

mod logging;

use clap::{Parser, Subcommand};
use pruner_core::{
    parse_table, BatchInput, BatchReport, ExclusionSource, PruneJob, Separator, SeparatorConfig,
    TableSource,
};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "table-pruner")]
#[command(about = "Remove table rows whose field value is in an exclusion list", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prune a file, every file in a directory, or a table given as text
    Prune {
        /// Input table file, or a directory of tables
        #[arg(short, long, required_unless_present = "text", conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Input table as text ("-" reads stdin)
        #[arg(long)]
        text: Option<String>,

        /// Reference table holding the values to exclude
        #[arg(long, required_unless_present = "exclude", conflicts_with = "exclude")]
        exclude_file: Option<PathBuf>,

        /// Values to exclude: one per line, or comma-separated on one line
        #[arg(short = 'x', long)]
        exclude: Option<String>,

        /// Column whose values are tested
        #[arg(short, long, default_value = pruner_core::filter::DEFAULT_PRUNING_FIELD)]
        field: String,

        /// Separator of the input tables (tab, comma, semicolon or a character)
        #[arg(long, default_value = "tab")]
        input_sep: Separator,

        /// Separator of the written tables
        #[arg(long, default_value = "tab")]
        output_sep: Separator,

        /// Separator of the reference table (defaults to --input-sep)
        #[arg(long)]
        exclude_sep: Option<Separator>,

        /// Ignore case and the characters - _ . / \ and space when comparing
        #[arg(long)]
        fuzzy: bool,

        /// Output file for text input
        #[arg(short, long, default_value = pruner_core::job::DEFAULT_FALLBACK_OUTPUT)]
        output: PathBuf,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a pruning job described by a JSON job file
    Run {
        /// Path to job file (JSON)
        #[arg(short, long)]
        job: PathBuf,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a job file template
    CreateJob {
        /// Output path for the job file
        #[arg(short, long)]
        output: PathBuf,

        /// Input table file or directory to put in the template
        #[arg(short, long, default_value = "specimens.tsv")]
        input: PathBuf,

        /// Reference table to put in the template
        #[arg(long, default_value = "prune.tsv")]
        exclude_file: PathBuf,
    },

    /// Show the columns and first rows of a table
    Inspect {
        /// Path to table file
        #[arg(short, long)]
        file: PathBuf,

        /// Separator of the table
        #[arg(long, default_value = "tab")]
        sep: Separator,

        /// Maximum number of rows to display
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> pruner_core::Result<()> {
    match command {
        Commands::Prune {
            input,
            text,
            exclude_file,
            exclude,
            field,
            input_sep,
            output_sep,
            exclude_sep,
            fuzzy,
            output,
            json,
        } => {
            let input = match (input, text) {
                (Some(path), _) => BatchInput::from_path(path)?,
                (None, Some(text)) => BatchInput::Text(read_text_arg(text)?),
                (None, None) => unreachable!("clap requires --input or --text"),
            };
            let exclusions = match (exclude_file, exclude) {
                (Some(path), _) => ExclusionSource::File(path),
                (None, Some(text)) => ExclusionSource::Text(text),
                (None, None) => unreachable!("clap requires --exclude-file or --exclude"),
            };

            let job = PruneJob {
                input,
                exclusions,
                pruning_field: field,
                separators: SeparatorConfig::new(input_sep, output_sep),
                exclusion_separator: exclude_sep,
                fuzzy,
                fallback_output: output,
            };
            cmd_run_job(&job, json)
        }
        Commands::Run { job, json } => {
            let job = PruneJob::load(&job)?;
            cmd_run_job(&job, json)
        }
        Commands::CreateJob {
            output,
            input,
            exclude_file,
        } => cmd_create_job(&output, input, exclude_file),
        Commands::Inspect { file, sep, limit } => cmd_inspect(&file, sep, limit),
    }
}

/// Read `-` as all of stdin, anything else verbatim
fn read_text_arg(value: String) -> pruner_core::Result<String> {
    if value != "-" {
        return Ok(value);
    }

    let mut bytes = Vec::new();
    std::io::stdin().read_to_end(&mut bytes)?;
    Ok(pruner_core::source::decode_lossy(&bytes, "stdin"))
}

fn cmd_run_job(job: &PruneJob, json: bool) -> pruner_core::Result<()> {
    let report = job.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &BatchReport) {
    println!("Excluding {} value(s)", report.exclusion_count);

    for item in &report.items {
        println!(
            "  {}: kept {} of {} rows -> {}",
            item.source,
            item.rows_retained,
            item.rows_read,
            item.destination.display()
        );
    }

    println!();
    println!("Pruning complete:");
    println!("  {} file(s) written", report.items.len());
    println!(
        "  {} of {} rows kept",
        report.total_retained(),
        report.total_read()
    );
}

fn cmd_create_job(
    output: &PathBuf,
    input: PathBuf,
    exclude_file: PathBuf,
) -> pruner_core::Result<()> {
    let job = PruneJob::new(BatchInput::File(input), ExclusionSource::File(exclude_file));

    job.save(output)?;
    println!("Created job file: {}", output.display());
    println!();
    println!("Edit the file to configure your run, then run:");
    println!("  table-pruner run --job {}", output.display());

    Ok(())
}

fn cmd_inspect(file: &PathBuf, sep: Separator, limit: usize) -> pruner_core::Result<()> {
    let table = parse_table(&TableSource::file(file), sep)?;

    println!("File: {}", file.display());
    println!("Separator: {}", sep);
    println!("Columns: {}", table.column_count());
    println!("Rows: {}", table.row_count());
    println!();

    for column in &table.columns {
        println!("  {:>3}  {}", column.index, column.name);
    }
    println!();

    println!("{}", table.header().join("\t"));
    println!("{}", "-".repeat(table.column_count() * 12));

    for row in table.rows.iter().take(limit) {
        println!("{}", row.cells.join("\t"));
    }

    if table.row_count() > limit {
        println!("... ({} more rows)", table.row_count() - limit);
    }

    Ok(())
}
