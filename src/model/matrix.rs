//! The matrix: ordered, named, independently typed columns

use tracing::debug;

use crate::error::{MatrixError, MatrixResult};

use super::column::Column;
use super::schema::ColumnType;
use super::value::Scalar;

/// Ordered collection of columns with a parallel list of unique names.
///
/// `keys[i]` names `columns[i]`. Columns are declared by name first and typed later; they are
/// never removed individually. Dropping the matrix (or calling [`Matrix::release`]) releases
/// every column and its elements exactly once.
#[derive(Debug)]
pub struct Matrix {
    columns: Vec<Column>,
    keys: Vec<String>,
    max_columns: usize,
}

impl Matrix {
    /// Create an empty matrix with slots reserved for `max_columns` columns
    pub fn new(max_columns: usize) -> MatrixResult<Self> {
        let mut columns: Vec<Column> = Vec::new();
        let mut keys: Vec<String> = Vec::new();
        let reserved = columns
            .try_reserve_exact(max_columns)
            .and_then(|_| keys.try_reserve_exact(max_columns));
        reserved.map_err(|source| MatrixError::Allocation {
            column: "<matrix>".to_string(),
            requested: max_columns,
            source,
        })?;

        Ok(Self {
            columns,
            keys,
            max_columns,
        })
    }

    /// Declare a new untyped column. Returns its index.
    pub fn declare_column(&mut self, name: impl Into<String>) -> MatrixResult<usize> {
        let name = name.into();
        if self.position(&name).is_some() {
            return Err(MatrixError::DuplicateName { name });
        }
        if self.len() >= self.max_columns {
            return Err(MatrixError::CapacityExceeded {
                name,
                max: self.max_columns,
            });
        }

        self.keys.push(name);
        self.columns.push(Column::new());
        Ok(self.len() - 1)
    }

    /// Bind a type to a declared column and reserve its backing storage
    pub fn bind_type(
        &mut self,
        index: usize,
        column_type: ColumnType,
        initial_capacity: usize,
    ) -> MatrixResult<()> {
        let (column, name) = self.slot_mut(index)?;
        column.bind(column_type, initial_capacity, name)?;
        debug!(column = %name, %column_type, initial_capacity, "bound column type");
        Ok(())
    }

    /// Append a value to the column at `index`. Returns the column's new length.
    pub fn append<'v>(
        &mut self,
        index: usize,
        value: impl Into<Scalar<'v>>,
    ) -> MatrixResult<usize> {
        let (column, name) = self.slot_mut(index)?;
        column.push(value.into(), name)
    }

    /// Find a column by exact, case-sensitive name
    pub fn lookup(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|i| &self.columns[i])
    }

    /// Like [`Matrix::lookup`], but a miss is a [`MatrixError::NotFound`]
    pub fn require(&self, name: &str) -> MatrixResult<&Column> {
        self.lookup(name).ok_or_else(|| MatrixError::NotFound {
            name: name.to_string(),
        })
    }

    /// Get column index by name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == name)
    }

    /// Get column by index
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Get column name by index
    pub fn name(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    /// Column names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// `(name, column)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.keys.iter().map(String::as_str).zip(self.columns.iter())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    /// Row count shared by every column, or `None` when there are no columns or their lengths
    /// disagree
    pub fn row_count(&self) -> Option<usize> {
        let first = self.columns.first()?.len();
        self.columns
            .iter()
            .all(|c| c.len() == first)
            .then_some(first)
    }

    /// Release every column, keeping the reserved slots. The matrix stays usable and empty.
    pub fn clear(&mut self) {
        debug!(columns = self.len(), "clearing matrix");
        self.columns.clear();
        self.keys.clear();
    }

    /// Tear the matrix down, releasing every column
    pub fn release(self) {
        debug!(columns = self.len(), "releasing matrix");
        drop(self);
    }

    fn slot_mut(&mut self, index: usize) -> MatrixResult<(&mut Column, &str)> {
        let size = self.len();
        match (self.columns.get_mut(index), self.keys.get(index)) {
            (Some(column), Some(name)) => Ok((column, name.as_str())),
            _ => Err(MatrixError::IndexOutOfRange { index, size }),
        }
    }
}
