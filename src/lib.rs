//! csvmatrix - typed columnar ingestion of delimited text
//!
//! A header line names the columns, a single sample line fixes each column's type (integer,
//! float or text), and every following line is parsed strictly against those types into a
//! [`Matrix`] of growable, typed columns.
//!
//! ```
//! use csvmatrix::{ingest_reader, Config, ColumnType};
//!
//! let input = "id,score,name\n1,2.5,alice\n,,bob\n";
//! let (matrix, report) = ingest_reader(input.as_bytes(), &Config::default()).unwrap();
//! assert_eq!(report.rows_ingested, 2);
//!
//! let id = matrix.lookup("id").unwrap();
//! assert_eq!(id.column_type(), Some(ColumnType::Integer));
//! assert_eq!(id.as_integers().unwrap(), &[1, csvmatrix::INT_MISSING]);
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

pub use config::Config;
pub use error::{IngestError, MatrixError, Stage};
pub use model::{Column, ColumnType, Matrix, Scalar, FLOAT_MISSING, INT_MISSING};
pub use parser::{ingest_path, ingest_reader, IngestReport, Ingestor};
