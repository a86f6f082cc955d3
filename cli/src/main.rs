//! tabscrub CLI - tabular data cleanup tool
//!
//! A command-line tool for cleaning web noise out of XLSX, CSV, and JSON
//! tables.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tabscrub::{
    clean_table, count_dirty, detect_format_from_path, read_table_from_path, table_to_records,
    write_csv, write_csv_path, CleanOptions, Table,
};

/// Tabular data cleanup: HTML, entities, CSS noise, and glued spacing
#[derive(Parser)]
#[command(
    name = "tabscrub",
    version,
    about = "Clean web noise out of tabular data files",
    long_about = "tabscrub - cell-level cleanup for tabular data.\n\n\
                  Strips HTML, decodes layered character entities, removes CSS\n\
                  spills and invisible characters, and repairs fused word\n\
                  boundaries in every cell of an XLSX, CSV, or JSON input.\n\n\
                  Usage:\n  \
                  tabscrub <file>            Clean and print CSV to stdout\n  \
                  tabscrub <file> <output>   Clean to the given file\n  \
                  tabscrub info <file>       Inspect contamination statistics"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (for default cleaning)
    #[arg(global = false)]
    input: Option<PathBuf>,

    /// Output file path (for default cleaning)
    #[arg(global = false)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean every cell of a tabular file (default command)
    Clean {
        /// Input file path (xlsx, csv, or json)
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (default: by output extension, else csv)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Keep <style> blocks and CSS fragments
        #[arg(long)]
        keep_styles: bool,

        /// Skip word-boundary spacing repair
        #[arg(long)]
        no_spacing: bool,

        /// Clean rows on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Convert between tabular formats without cleaning
    Convert {
        /// Input file path (xlsx, csv, or json)
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (default: by output extension, else csv)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show table information and contamination statistics
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Output format
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Comma-separated values with a UTF-8 BOM
    Csv,
    /// JSON array of records
    Json,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Handle default command (tabscrub <file> [output])
    if cli.command.is_none() {
        if let Some(input) = cli.input {
            return run_clean(&input, cli.output.as_ref(), None, CleanOptions::default());
        } else {
            // No input provided, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            return Ok(());
        }
    }

    match cli.command.unwrap() {
        Commands::Clean {
            input,
            output,
            format,
            keep_styles,
            no_spacing,
            sequential,
        } => {
            let mut options = CleanOptions::default();
            if keep_styles {
                options = options.without_style_stripping();
            }
            if no_spacing {
                options = options.without_spacing();
            }
            if sequential {
                options = options.sequential();
            }
            run_clean(&input, output.as_ref(), format, options)?;
        }

        Commands::Convert {
            input,
            output,
            format,
        } => {
            run_convert(&input, output.as_ref(), format)?;
        }

        Commands::Info { input } => {
            run_info(&input)?;
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Read, clean, and write a table, reporting contamination statistics.
fn run_clean(
    input: &PathBuf,
    output: Option<&PathBuf>,
    format: Option<OutputFormat>,
    options: CleanOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Reading input...");

    let detected = detect_format_from_path(input)?;
    let table = read_table_from_path(input)?;
    let dirty_before = count_dirty(&table);

    pb.set_message("Cleaning cells...");
    let cleaned = clean_table(&table, &options);

    pb.set_message("Writing output...");
    write_table(&cleaned, output, resolve_format(output, format))?;

    pb.finish_and_clear();

    if let Some(path) = output {
        println!("{}", "Cleaning Complete".green().bold());
        println!("{}", "─".repeat(40));
        println!("{}: {} ({})", "Input".bold(), input.display(), detected);
        println!("{}: {}", "Rows".bold(), cleaned.row_count());
        println!("{}: {}", "Columns".bold(), cleaned.column_count());
        println!("{}: {}", "Dirty cells cleaned".bold(), dirty_before);
        println!("  {} {}", "✓".green(), path.display());
    }

    Ok(())
}

/// Read a table and write it back out in another format, untouched.
fn run_convert(
    input: &PathBuf,
    output: Option<&PathBuf>,
    format: Option<OutputFormat>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Reading input...");

    let detected = detect_format_from_path(input)?;
    let table = read_table_from_path(input)?;

    pb.set_message("Writing output...");
    write_table(&table, output, resolve_format(output, format))?;

    pb.finish_and_clear();

    if let Some(path) = output {
        println!("{}", "Conversion Complete".green().bold());
        println!("{}", "─".repeat(40));
        println!("{}: {} ({})", "Input".bold(), input.display(), detected);
        println!("{}: {}", "Rows".bold(), table.row_count());
        println!("{}: {}", "Columns".bold(), table.column_count());
        println!("  {} {}", "✓".green(), path.display());
    }

    Ok(())
}

fn run_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Analyzing input...");

    let format = detect_format_from_path(input)?;
    let table = read_table_from_path(input)?;
    let dirty = count_dirty(&table);

    pb.finish_and_clear();

    println!("{}", "Table Information".cyan().bold());
    println!("{}", "─".repeat(40));
    println!(
        "{}: {}",
        "File".bold(),
        input.file_name().unwrap_or_default().to_string_lossy()
    );
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Rows".bold(), table.row_count());
    println!("{}: {}", "Columns".bold(), table.column_count());
    if !table.columns.is_empty() {
        println!("{}: {}", "Names".bold(), table.columns.join(", "));
    }

    println!("\n{}", "Contamination".cyan().bold());
    println!("{}", "─".repeat(40));
    println!("{}: {}", "Cells".bold(), table.cell_count());
    println!("{}: {}", "Dirty cells".bold(), dirty);
    if table.cell_count() > 0 {
        let share = dirty as f64 * 100.0 / table.cell_count() as f64;
        println!("{}: {:.1}%", "Dirty share".bold(), share);
    }

    Ok(())
}

/// Picks the output format: explicit flag first, then the output file
/// extension, then CSV.
fn resolve_format(output: Option<&PathBuf>, explicit: Option<OutputFormat>) -> OutputFormat {
    if let Some(format) = explicit {
        return format;
    }
    match output.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
        _ => OutputFormat::Csv,
    }
}

fn write_table(
    table: &Table,
    output: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Csv => match output {
            Some(path) => write_csv_path(table, path)?,
            None => {
                let stdout = io::stdout();
                let handle = stdout.lock();
                write_csv(table, handle)?;
            }
        },
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&table_to_records(table))?;
            write_output(output, &json)?;
        }
    }
    Ok(())
}

fn print_version() {
    println!("{} {}", "tabscrub".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Cell-level cleanup for tabular data with web noise");
    println!();
    println!("Supported inputs: XLSX, CSV, JSON");
    println!("Repository: https://github.com/tabscrub/tabscrub");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
