//! Parser layer: line sources, tokenizing, type inference and the ingestion pipeline

mod csv;
pub mod infer;
mod lines;
pub mod tokenizer;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::IngestResult;
use crate::model::Matrix;

pub use self::csv::{IngestReport, Ingestor, SkippedRow};
pub use self::lines::LineReader;

/// One raw input line, without its terminator.
///
/// `text` borrows the source's line buffer and is only valid until the next read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    pub text: &'a str,
}

/// Lazy, finite, non-restartable sequence of lines
pub trait LineSource {
    /// Read the next line. `Ok(None)` marks end of input; read failures are errors.
    fn next_line(&mut self) -> IngestResult<Option<Line<'_>>>;
}

/// Ingest a delimited table from any buffered reader
pub fn ingest_reader<R: BufRead>(reader: R, config: &Config) -> IngestResult<(Matrix, IngestReport)> {
    let mut source = LineReader::new(reader, config.max_line_length);
    let mut ingestor = Ingestor::new(config)?;
    ingestor.ingest(&mut source)?;
    Ok(ingestor.into_parts())
}

/// Ingest a delimited table from a file
pub fn ingest_path(path: &Path, config: &Config) -> IngestResult<(Matrix, IngestReport)> {
    info!(path = %path.display(), "ingesting");
    let file = File::open(path)?;
    ingest_reader(BufReader::new(file), config)
}
