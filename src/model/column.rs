//! Typed, growable column storage

use crate::error::{MatrixError, MatrixResult};

use super::schema::ColumnType;
use super::value::Scalar;

/// Backing storage for one column, tagged by its bound type
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ColumnData {
    /// Declared but not yet typed
    #[default]
    Unbound,
    Integer(Vec<i64>),
    Float(Vec<f64>),
    /// Every element is an independently owned string
    Text(Vec<String>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            ColumnData::Unbound => 0,
            ColumnData::Integer(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }
}

/// One typed sequence of values.
///
/// `capacity` is the logical slot count: it starts at the capacity requested when the type is
/// bound and doubles whenever an append finds the column full.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    data: ColumnData,
    capacity: usize,
}

impl Column {
    /// Create an untyped placeholder with no storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound type, or `None` while the column is still a placeholder
    pub fn column_type(&self) -> Option<ColumnType> {
        match self.data {
            ColumnData::Unbound => None,
            ColumnData::Integer(_) => Some(ColumnType::Integer),
            ColumnData::Float(_) => Some(ColumnType::Float),
            ColumnData::Text(_) => Some(ColumnType::Text),
        }
    }

    /// Number of populated elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated slots; always `>= len()`
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Get the element at `index`
    pub fn get(&self, index: usize) -> Option<Scalar<'_>> {
        match &self.data {
            ColumnData::Unbound => None,
            ColumnData::Integer(v) => v.get(index).copied().map(Scalar::Integer),
            ColumnData::Float(v) => v.get(index).copied().map(Scalar::Float),
            ColumnData::Text(v) => v.get(index).map(|s| Scalar::Text(s.as_str())),
        }
    }

    /// Iterate elements `0..len()` in append order
    pub fn iter(&self) -> impl Iterator<Item = Scalar<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    pub fn as_integers(&self) -> Option<&[i64]> {
        match &self.data {
            ColumnData::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f64]> {
        match &self.data {
            ColumnData::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_texts(&self) -> Option<&[String]> {
        match &self.data {
            ColumnData::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Count elements holding the missing sentinel
    pub fn missing_count(&self) -> usize {
        self.iter().filter(|v| v.is_missing()).count()
    }

    /// Assign a type and reserve `initial_capacity` slots for it.
    ///
    /// `name` is only used for error context.
    pub(super) fn bind(
        &mut self,
        column_type: ColumnType,
        initial_capacity: usize,
        name: &str,
    ) -> MatrixResult<()> {
        if let Some(bound) = self.column_type() {
            return Err(MatrixError::AlreadyTyped {
                column: name.to_string(),
                column_type: bound,
            });
        }

        self.data = match column_type {
            ColumnType::Integer => ColumnData::Integer(reserve(initial_capacity, name)?),
            ColumnType::Float => ColumnData::Float(reserve(initial_capacity, name)?),
            ColumnType::Text => ColumnData::Text(reserve(initial_capacity, name)?),
        };
        self.capacity = initial_capacity;
        Ok(())
    }

    /// Append one value, doubling capacity first when the column is full.
    ///
    /// Text is copied into a new owned `String`. Returns the new length.
    pub(super) fn push(&mut self, value: Scalar<'_>, name: &str) -> MatrixResult<usize> {
        let bound = self.column_type();
        let capacity = &mut self.capacity;
        match (&mut self.data, value) {
            (ColumnData::Integer(v), Scalar::Integer(i)) => {
                grow_if_full(v, capacity, name)?;
                v.push(i);
            }
            (ColumnData::Float(v), Scalar::Float(f)) => {
                grow_if_full(v, capacity, name)?;
                v.push(f);
            }
            (ColumnData::Text(v), Scalar::Text(s)) => {
                grow_if_full(v, capacity, name)?;
                v.push(s.to_owned());
            }
            (_, value) => {
                return Err(match bound {
                    Some(expected) => MatrixError::TypeMismatch {
                        column: name.to_string(),
                        expected,
                        found: value.column_type(),
                    },
                    None => MatrixError::Untyped {
                        column: name.to_string(),
                    },
                });
            }
        }
        Ok(self.len())
    }
}

fn reserve<T>(slots: usize, name: &str) -> MatrixResult<Vec<T>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(slots)
        .map_err(|source| MatrixError::Allocation {
            column: name.to_string(),
            requested: slots,
            source,
        })?;
    Ok(values)
}

/// Double `capacity` when `values` has filled it. On failure neither the values nor the
/// recorded capacity change.
fn grow_if_full<T>(values: &mut Vec<T>, capacity: &mut usize, name: &str) -> MatrixResult<()> {
    if values.len() < *capacity {
        return Ok(());
    }

    let target = capacity.saturating_mul(2).max(1);
    values
        .try_reserve_exact(target - values.len())
        .map_err(|source| MatrixError::Allocation {
            column: name.to_string(),
            requested: target,
            source,
        })?;
    *capacity = target;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound(column_type: ColumnType, capacity: usize) -> Column {
        let mut column = Column::new();
        column.bind(column_type, capacity, "c").unwrap();
        column
    }

    #[test]
    fn test_placeholder_has_no_type() {
        let column = Column::new();
        assert_eq!(column.column_type(), None);
        assert_eq!(column.len(), 0);
        assert_eq!(column.capacity(), 0);
        assert_eq!(column.get(0), None);
    }

    #[test]
    fn test_round_trip_every_type() {
        let mut ints = bound(ColumnType::Integer, 4);
        let mut floats = bound(ColumnType::Float, 4);
        let mut texts = bound(ColumnType::Text, 4);

        for i in 0..10 {
            ints.push(Scalar::Integer(i * 3), "ints").unwrap();
            floats.push(Scalar::Float(i as f64 / 2.0), "floats").unwrap();
            texts.push(Scalar::Text(&format!("v{}", i)), "texts").unwrap();
        }

        let expected_ints: Vec<i64> = (0..10).map(|i| i * 3).collect();
        assert_eq!(ints.as_integers().unwrap(), expected_ints.as_slice());
        for i in 0..10 {
            assert_eq!(floats.get(i), Some(Scalar::Float(i as f64 / 2.0)));
            assert_eq!(texts.get(i).unwrap().as_text(), Some(format!("v{}", i).as_str()));
        }
        assert_eq!(texts.get(10), None);
    }

    #[test]
    fn test_growth_doubles_and_keeps_elements() {
        let mut column = bound(ColumnType::Integer, 2);
        assert_eq!(column.push(Scalar::Integer(1), "c").unwrap(), 1);
        assert_eq!(column.push(Scalar::Integer(2), "c").unwrap(), 2);
        assert_eq!(column.capacity(), 2);

        assert_eq!(column.push(Scalar::Integer(3), "c").unwrap(), 3);
        assert_eq!(column.capacity(), 4);
        assert_eq!(column.as_integers().unwrap(), &[1, 2, 3]);

        column.push(Scalar::Integer(4), "c").unwrap();
        column.push(Scalar::Integer(5), "c").unwrap();
        assert_eq!(column.capacity(), 8);
        assert!(column.capacity() >= column.len());
    }

    #[test]
    fn test_zero_initial_capacity_grows() {
        let mut column = bound(ColumnType::Text, 0);
        column.push(Scalar::Text("a"), "c").unwrap();
        assert_eq!(column.capacity(), 1);
        column.push(Scalar::Text("b"), "c").unwrap();
        assert_eq!(column.capacity(), 2);
        assert_eq!(column.as_texts().unwrap(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_text_is_copied() {
        let mut column = bound(ColumnType::Text, 1);
        let mut line = String::from("alice");
        column.push(Scalar::Text(&line), "c").unwrap();
        line.clear();
        line.push_str("mallory");
        assert_eq!(column.get(0), Some(Scalar::Text("alice")));
    }

    #[test]
    fn test_failed_bind_leaves_placeholder() {
        let mut column = Column::new();
        let err = column
            .bind(ColumnType::Integer, usize::MAX / 8, "huge")
            .unwrap_err();
        assert!(matches!(err, MatrixError::Allocation { ref column, .. } if column == "huge"));
        assert_eq!(column.column_type(), None);
        assert_eq!(column.capacity(), 0);

        column.bind(ColumnType::Integer, 4, "huge").unwrap();
        column.push(Scalar::Integer(1), "huge").unwrap();
        assert_eq!(column.as_integers().unwrap(), &[1]);
    }

    #[test]
    fn test_failed_growth_keeps_state() {
        // elements too large for any allocator to satisfy even one slot
        let mut values: Vec<[u8; 1 << 60]> = Vec::new();
        let mut capacity = 0;
        let err = grow_if_full(&mut values, &mut capacity, "wide").unwrap_err();
        assert!(matches!(err, MatrixError::Allocation { requested: 1, .. }));
        assert_eq!(capacity, 0);
        assert!(values.is_empty());

        let mut full: Vec<i64> = vec![7, 8];
        let mut logical = 2;
        grow_if_full(&mut full, &mut logical, "c").unwrap();
        assert_eq!(logical, 4);
        assert_eq!(full, vec![7, 8]);
        assert!(full.capacity() >= 4);
    }

    #[test]
    fn test_bind_twice_is_rejected() {
        let mut column = bound(ColumnType::Float, 4);
        let err = column.bind(ColumnType::Integer, 4, "score").unwrap_err();
        assert!(matches!(
            err,
            MatrixError::AlreadyTyped {
                column_type: ColumnType::Float,
                ..
            }
        ));
    }

    #[test]
    fn test_type_mismatch_and_untyped() {
        let mut column = bound(ColumnType::Integer, 4);
        let err = column.push(Scalar::Text("x"), "id").unwrap_err();
        assert!(matches!(
            err,
            MatrixError::TypeMismatch {
                expected: ColumnType::Integer,
                found: ColumnType::Text,
                ..
            }
        ));
        assert!(column.is_empty());

        let mut placeholder = Column::new();
        let err = placeholder.push(Scalar::Integer(1), "id").unwrap_err();
        assert!(matches!(err, MatrixError::Untyped { .. }));
    }

    #[test]
    fn test_missing_count() {
        let mut column = bound(ColumnType::Float, 4);
        column.push(Scalar::Float(1.0), "c").unwrap();
        column.push(Scalar::missing(ColumnType::Float), "c").unwrap();
        column.push(Scalar::Float(f64::NEG_INFINITY), "c").unwrap();
        assert_eq!(column.missing_count(), 1);
    }
}
