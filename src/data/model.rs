use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;

use crate::error::{FrameError, Result};

// ---------------------------------------------------------------------------
// Value – a single cell of a record set
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
/// Used as a `HashMap` key by the duplicate detector, so `Value` must be
/// `Eq + Hash`; equality is defined through the total order below.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Null,
}

// -- Manual Eq/Ord so floats (NaN included) behave as map keys --

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                DateTime(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::DateTime(dt) => dt.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl Value {
    /// Interpret the value as an `f64` when it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Ordering used for sorting and ranking: numeric cells compare by
    /// magnitude across `Integer`/`Float`, everything else by `Ord`.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b)),
            _ => self.cmp(other),
        }
    }

    /// Null cells and float NaN count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn dtype(&self) -> Option<DType> {
        match self {
            Value::String(_) => Some(DType::Utf8),
            Value::Integer(_) => Some(DType::Int64),
            Value::Float(_) => Some(DType::Float64),
            Value::Bool(_) => Some(DType::Bool),
            Value::DateTime(_) => Some(DType::DateTime),
            Value::Null => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Column – a named, typed vector of cells
// ---------------------------------------------------------------------------

/// Column element type. `Object` covers mixed or all-null columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Int64,
    Float64,
    Bool,
    Utf8,
    DateTime,
    Object,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Bool => "bool",
            DType::Utf8 => "utf8",
            DType::DateTime => "datetime",
            DType::Object => "object",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: DType,
    pub values: Vec<Value>,
}

impl Column {
    /// Build a column, inferring its dtype from the non-null cells.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let dtype = infer_dtype(&values);
        Self::with_dtype(name, dtype, values)
    }

    /// Build a column of a known dtype. Integer cells in a `Float64`
    /// column are widened, so `4` and `4.0` are the same key.
    pub fn with_dtype(name: impl Into<String>, dtype: DType, mut values: Vec<Value>) -> Self {
        if dtype == DType::Float64 {
            for cell in &mut values {
                if let Value::Integer(i) = *cell {
                    *cell = Value::Float(i as f64);
                }
            }
        }
        Column {
            name: name.into(),
            dtype,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn infer_dtype(values: &[Value]) -> DType {
    let mut seen: Option<DType> = None;
    for dtype in values.iter().filter_map(Value::dtype) {
        match seen {
            None => seen = Some(dtype),
            Some(prev) if prev == dtype => {}
            Some(DType::Int64) if dtype == DType::Float64 => seen = Some(DType::Float64),
            Some(DType::Float64) if dtype == DType::Int64 => {}
            Some(_) => return DType::Object,
        }
    }
    seen.unwrap_or(DType::Object)
}

// ---------------------------------------------------------------------------
// RecordSet – ordered columns plus a positional row index
// ---------------------------------------------------------------------------

/// Tabular record set: ordered, equal-length columns and one index label
/// per row. Filtering keeps the labels of the surviving rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    index: Vec<i64>,
    columns: Vec<Column>,
}

impl RecordSet {
    /// Build a record set with the default `0..n` index.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, Column::len);
        Self::with_index((0..n_rows as i64).collect(), columns)
    }

    pub fn with_index(index: Vec<i64>, columns: Vec<Column>) -> Result<Self> {
        for col in &columns {
            if col.len() != index.len() {
                return Err(FrameError::ColumnLength {
                    column: col.name.clone(),
                    expected: index.len(),
                    found: col.len(),
                });
            }
        }
        Ok(RecordSet { index, columns })
    }

    /// Build from row-major cells; every row must have one cell per column.
    pub fn from_rows(column_names: &[String], rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut buffers: Vec<Vec<Value>> = column_names
            .iter()
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();
        for row in rows {
            if row.len() != column_names.len() {
                return Err(FrameError::ColumnLength {
                    column: "<row>".to_string(),
                    expected: column_names.len(),
                    found: row.len(),
                });
            }
            for (buf, cell) in buffers.iter_mut().zip(row) {
                buf.push(cell);
            }
        }
        let columns = column_names
            .iter()
            .zip(buffers)
            .map(|(name, values)| Column::new(name.clone(), values))
            .collect();
        Self::new(columns)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[i64] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))
    }

    /// Replace the named column, or append it when absent.
    pub fn set_column(&mut self, column: Column) -> Result<()> {
        let found = column.len();
        if found != self.len() {
            return Err(FrameError::ColumnLength {
                column: column.name,
                expected: self.len(),
                found,
            });
        }
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(slot) => *slot = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Rename every column with `f`, leaving order and cells untouched.
    pub fn rename_columns(mut self, f: impl Fn(&str) -> String) -> Self {
        for col in &mut self.columns {
            col.name = f(&col.name);
        }
        self
    }

    /// Rows at `positions`, in that order, keeping index labels and dtypes.
    pub fn take(&self, positions: &[usize]) -> Self {
        let index = positions.iter().map(|&p| self.index[p]).collect();
        let columns = self
            .columns
            .iter()
            .map(|col| {
                Column::with_dtype(
                    col.name.clone(),
                    col.dtype,
                    positions.iter().map(|&p| col.values[p].clone()).collect(),
                )
            })
            .collect();
        RecordSet { index, columns }
    }

    /// Cells of one row, in column order.
    pub fn row(&self, position: usize) -> Vec<&Value> {
        self.columns.iter().map(|c| &c.values[position]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dtype_is_inferred_from_non_null_cells() {
        let col = Column::new("a", vec![Value::Null, 1i64.into(), 2.5.into()]);
        assert_eq!(col.dtype, DType::Float64);
        let col = Column::new("b", vec!["x".into(), 1i64.into()]);
        assert_eq!(col.dtype, DType::Object);
        let col = Column::new("c", vec![]);
        assert_eq!(col.dtype, DType::Object);
    }

    #[test]
    fn mismatched_column_lengths_are_rejected() {
        let err = RecordSet::new(vec![
            Column::new("a", vec![1i64.into(), 2i64.into()]),
            Column::new("b", vec![1i64.into()]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            FrameError::ColumnLength {
                column: "b".into(),
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn take_keeps_labels_and_dtypes() {
        let rs = RecordSet::new(vec![Column::new("a", vec![10i64.into(), 20i64.into(), 30i64.into()])])
            .unwrap();
        let sub = rs.take(&[2, 0]);
        assert_eq!(sub.index(), &[2, 0]);
        assert_eq!(sub.column("a").unwrap().values, vec![Value::Integer(30), Value::Integer(10)]);

        let empty = rs.take(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.column("a").unwrap().dtype, DType::Int64);
    }

    #[test]
    fn missing_column_names_the_column() {
        let rs = RecordSet::new(vec![]).unwrap();
        assert_eq!(rs.column("nope").unwrap_err(), FrameError::MissingColumn("nope".into()));
    }

    #[test]
    fn integers_in_float_columns_are_widened() {
        let col = Column::new("k", vec![Value::Integer(4), Value::Float(4.0), Value::Null]);
        assert_eq!(col.values, vec![Value::Float(4.0), Value::Float(4.0), Value::Null]);
        let col = Column::new("k", vec![Value::Integer(4), Value::Integer(5)]);
        assert_eq!(col.values, vec![Value::Integer(4), Value::Integer(5)]);
    }

    #[test]
    fn replacing_a_column_checks_its_length() {
        let mut rs = RecordSet::new(vec![Column::new("a", vec![1i64.into(), 2i64.into()])]).unwrap();
        let err = rs.set_column(Column::new("b", vec![1i64.into()])).unwrap_err();
        assert_eq!(
            err,
            FrameError::ColumnLength {
                column: "b".into(),
                expected: 2,
                found: 1
            }
        );
        rs.set_column(Column::new("a", vec![3i64.into(), 4i64.into()])).unwrap();
        assert_eq!(rs.column_names(), vec!["a"]);
        assert_eq!(rs.column("a").unwrap().values, vec![Value::Integer(3), Value::Integer(4)]);
    }

    #[test]
    fn nan_floats_are_equal_keys() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert!(Value::Float(f64::NAN).is_missing());
    }
}
