//! Header, type inference and row parsing over a line source

use tracing::{debug, info, warn};

use crate::config::{Config, FloatPolicy, RowPolicy};
use crate::error::{IngestError, IngestResult, MatrixError, Stage};
use crate::model::{ColumnType, Matrix, Scalar};

use super::infer::{infer, parse_as};
use super::tokenizer::split_fields;
use super::{Line, LineSource};

/// A data row left out of the matrix in lenient mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the input
    pub line: usize,
    pub reason: String,
}

/// Outcome of one ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Data rows appended to every column, the sample row included
    pub rows_ingested: usize,
    pub skipped: Vec<SkippedRow>,
    /// Empty data lines ignored in tables of two or more columns
    pub blank_lines: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Inference,
    Rows,
    Done,
}

/// Drives a [`Matrix`] through header, inference and row parsing, in that order.
///
/// The ingestor owns the matrix. When a malformed row aborts ingestion in strict mode, the
/// matrix still holds every row ingested before it. I/O, line-length and storage failures
/// clear the matrix instead.
pub struct Ingestor {
    delimiter: char,
    initial_capacity: usize,
    row_policy: RowPolicy,
    float_policy: FloatPolicy,
    matrix: Matrix,
    types: Vec<ColumnType>,
    state: State,
    report: IngestReport,
}

impl Ingestor {
    /// Create an ingestor with an empty matrix sized from `config`
    pub fn new(config: &Config) -> IngestResult<Self> {
        let matrix = Matrix::new(config.max_columns).map_err(|source| IngestError::Store {
            stage: Stage::Header,
            line: 0,
            source,
        })?;

        Ok(Self {
            delimiter: config.delimiter,
            initial_capacity: config.initial_capacity,
            row_policy: config.row_policy,
            float_policy: config.float_policy,
            matrix,
            types: Vec::new(),
            state: State::Header,
            report: IngestReport::default(),
        })
    }

    /// Consume `source` to the end. May only run once per ingestor.
    pub fn ingest<S: LineSource>(&mut self, source: &mut S) -> IngestResult<&IngestReport> {
        if self.state != State::Header {
            return Err(IngestError::AlreadyIngested);
        }

        let result = self
            .read_header(source)
            .and_then(|_| self.infer_types(source))
            .and_then(|_| self.read_rows(source));
        self.state = State::Done;

        if let Err(e) = result {
            if releases_matrix(&e) {
                self.matrix.clear();
                self.types.clear();
                self.report.rows_ingested = 0;
            }
            return Err(e);
        }

        info!(
            columns = self.matrix.len(),
            rows = self.report.rows_ingested,
            skipped = self.report.skipped.len(),
            "ingestion complete"
        );
        Ok(&self.report)
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    pub fn into_parts(self) -> (Matrix, IngestReport) {
        (self.matrix, self.report)
    }

    /// Declare one column per trimmed header field
    fn read_header<S: LineSource>(&mut self, source: &mut S) -> IngestResult<()> {
        let line = source.next_line()?.ok_or(IngestError::UnexpectedEof {
            stage: Stage::Header,
        })?;

        for (index, raw) in split_fields(line.text, self.delimiter).enumerate() {
            let name = raw.trim();
            if name.is_empty() {
                return Err(IngestError::InvalidHeader {
                    field: index + 1,
                    reason: "empty column name".to_string(),
                });
            }
            match self.matrix.declare_column(name) {
                Ok(_) => {}
                Err(MatrixError::DuplicateName { name }) => {
                    return Err(IngestError::InvalidHeader {
                        field: index + 1,
                        reason: format!("duplicate column name '{}'", name),
                    });
                }
                Err(err) => return Err(store_error(Stage::Header, &line, err)),
            }
        }

        debug!(columns = self.matrix.len(), "header parsed");
        self.state = State::Inference;
        Ok(())
    }

    /// Fix every column's type from the sample row and append the sample values
    fn infer_types<S: LineSource>(&mut self, source: &mut S) -> IngestResult<()> {
        let line = source.next_line()?.ok_or(IngestError::UnexpectedEof {
            stage: Stage::Inference,
        })?;

        let fields = self.split_checked(&line, Stage::Inference)?;
        for (index, field) in fields.into_iter().enumerate() {
            let value = infer(field, self.float_policy);
            let column_type = value.column_type();
            self.matrix
                .bind_type(index, column_type, self.initial_capacity)
                .and_then(|_| self.matrix.append(index, value))
                .map_err(|err| store_error(Stage::Inference, &line, err))?;
            self.types.push(column_type);
        }

        self.report.rows_ingested = 1;
        debug!(types = ?self.types, "column types inferred");
        self.state = State::Rows;
        Ok(())
    }

    /// Parse and append every remaining line
    fn read_rows<S: LineSource>(&mut self, source: &mut S) -> IngestResult<()> {
        while let Some(line) = source.next_line()? {
            // in a one-column table an empty line is a row holding one empty field
            if line.text.is_empty() && self.matrix.len() > 1 {
                debug!(line = line.number, "skipping blank line");
                self.report.blank_lines += 1;
                continue;
            }

            let values = match self.parse_row(&line) {
                Ok(values) => values,
                Err(e) if e.is_row_local() && self.row_policy == RowPolicy::Lenient => {
                    warn!(line = line.number, error = %e, "skipping malformed row");
                    self.report.skipped.push(SkippedRow {
                        line: line.number,
                        reason: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            for (index, value) in values.into_iter().enumerate() {
                self.matrix
                    .append(index, value)
                    .map_err(|err| store_error(Stage::Row, &line, err))?;
            }
            self.report.rows_ingested += 1;
        }
        Ok(())
    }

    /// Parse every field of a row before anything is appended, so a bad field never leaves a
    /// partial row behind
    fn parse_row<'a>(&self, line: &Line<'a>) -> IngestResult<Vec<Scalar<'a>>> {
        let fields = self.split_checked(line, Stage::Row)?;
        fields
            .into_iter()
            .zip(&self.types)
            .zip(self.matrix.names())
            .map(|((field, &column_type), column)| {
                parse_as(field, column_type, self.float_policy).ok_or_else(|| IngestError::Parse {
                    line: line.number,
                    column: column.to_string(),
                    raw: field.to_string(),
                    expected: column_type,
                })
            })
            .collect()
    }

    fn split_checked<'a>(&self, line: &Line<'a>, stage: Stage) -> IngestResult<Vec<&'a str>> {
        let fields: Vec<&'a str> = split_fields(line.text, self.delimiter).collect();
        if fields.len() != self.matrix.len() {
            return Err(IngestError::RowArityMismatch {
                stage,
                line: line.number,
                expected: self.matrix.len(),
                found: fields.len(),
            });
        }
        Ok(fields)
    }
}

fn store_error(stage: Stage, line: &Line<'_>, source: MatrixError) -> IngestError {
    IngestError::Store {
        stage,
        line: line.number,
        source,
    }
}

/// Whether a failure leaves the matrix in a state that must not be handed out
fn releases_matrix(error: &IngestError) -> bool {
    matches!(
        error,
        IngestError::Io(_) | IngestError::LineTooLong { .. } | IngestError::Store { .. }
    )
}
