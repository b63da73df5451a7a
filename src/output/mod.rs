//! Output formatting for an ingested matrix

mod json;
mod summary;
mod terminal;

use anyhow::Result;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::config::OutputFormat;
use crate::model::{Column, Matrix};

pub use json::JsonOutput;
pub use summary::SummaryOutput;
pub use terminal::TerminalOutput;

/// Named columns to print, in output order
pub type ColumnSelection<'a> = [(&'a str, &'a Column)];

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render the selected columns to a writer
    fn render(&self, columns: &ColumnSelection<'_>, writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Table => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
            OutputFormat::Summary => Box::new(SummaryOutput::new()),
        }
    }
}

/// Pick every column, or only the one called `name`
pub fn select<'a>(
    matrix: &'a Matrix,
    name: Option<&'a str>,
) -> Result<Vec<(&'a str, &'a Column)>> {
    match name {
        None => Ok(matrix.iter().collect()),
        Some(name) => Ok(vec![(name, matrix.require(name)?)]),
    }
}

/// Render a matrix to stdout
pub fn render_to_stdout(
    matrix: &Matrix,
    column: Option<&str>,
    format: OutputFormat,
    color: ColorChoice,
) -> Result<()> {
    let columns = select(matrix, column)?;
    let formatter = OutputFactory::create(format);
    let mut stdout = StandardStream::stdout(color);
    formatter.render(&columns, &mut stdout)
}
