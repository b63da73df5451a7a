//! Columnar store: typed growable columns and the named matrix holding them

mod column;
mod matrix;
mod schema;
mod value;

pub use column::{Column, ColumnData};
pub use matrix::Matrix;
pub use schema::ColumnType;
pub use value::{Scalar, FLOAT_MISSING, INT_MISSING};
