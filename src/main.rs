//! csvmatrix - typed columnar ingestion of delimited text

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use termcolor::ColorChoice;
use tracing_subscriber::EnvFilter;

use csvmatrix::config::{
    Config, FloatPolicy, OutputFormat, RowPolicy, DEFAULT_INITIAL_CAPACITY,
    DEFAULT_MAX_COLUMNS, DEFAULT_MAX_LINE_LENGTH,
};
use csvmatrix::output::render_to_stdout;
use csvmatrix::parser::ingest_path;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Table,
    Json,
    Summary,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Summary => OutputFormat::Summary,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFloatPolicy {
    Strict,
    Prefix,
}

impl From<CliFloatPolicy> for FloatPolicy {
    fn from(p: CliFloatPolicy) -> Self {
        match p {
            CliFloatPolicy::Strict => FloatPolicy::Strict,
            CliFloatPolicy::Prefix => FloatPolicy::Prefix,
        }
    }
}

/// Load a delimited text table into typed columns and print it
#[derive(Parser, Debug)]
#[command(name = "csvmatrix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to ingest
    input: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: CliOutputFormat,

    /// Only print this column
    #[arg(short, long)]
    column: Option<String>,

    /// Skip malformed rows instead of stopping at the first one
    #[arg(long)]
    lenient: bool,

    /// How much of a field must be numeric to count as a float
    #[arg(long, value_enum, default_value = "strict")]
    float_policy: CliFloatPolicy,

    /// Maximum number of columns
    #[arg(long, default_value_t = DEFAULT_MAX_COLUMNS)]
    max_columns: usize,

    /// Slots reserved per column before it first grows
    #[arg(long, default_value_t = DEFAULT_INITIAL_CAPACITY)]
    initial_capacity: usize,

    /// Maximum line length in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LENGTH)]
    max_line_length: usize,

    /// Never color output (color is only used on a terminal)
    #[arg(long)]
    no_color: bool,

    /// Log pipeline progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(skipped) => {
            if skipped {
                ExitCode::from(1) // Rows were skipped
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("CSVMATRIX_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let row_policy = if cli.lenient {
        RowPolicy::Lenient
    } else {
        RowPolicy::Strict
    };
    let mut config = Config::new(cli.input.clone())
        .with_delimiter(cli.delimiter)
        .with_max_columns(cli.max_columns)
        .with_initial_capacity(cli.initial_capacity)
        .with_max_line_length(cli.max_line_length)
        .with_row_policy(row_policy)
        .with_float_policy(cli.float_policy.into())
        .with_output_format(cli.format.into());
    if let Some(column) = cli.column {
        config = config.with_column(column);
    }

    let (matrix, report) = ingest_path(&config.input, &config)
        .with_context(|| format!("Failed to ingest {}", config.input.display()))?;

    for skipped in &report.skipped {
        eprintln!("skipped line {}: {}", skipped.line, skipped.reason);
    }

    let color = if cli.no_color || !std::io::stdout().is_terminal() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    render_to_stdout(&matrix, config.column.as_deref(), config.output_format, color)?;

    Ok(!report.skipped.is_empty())
}
