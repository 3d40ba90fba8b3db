//! Result values
//!
//! Every evaluation produces a [`ResultValue`]: a dimensionless number, a
//! dense matrix of dimensionless numbers, or one of those two tagged with a
//! [`UnitMap`]. A unit never wraps another unit; [`UnitValue`] can only hold
//! a [`Quantity`].

use std::fmt;
use std::ops::Neg;

use equate_units::UnitMap;

static DIMENSIONLESS: UnitMap = UnitMap::new();

/// Rows × columns of a matrix, displayed as `"{rows}x{cols}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Dense, rectangular, non-empty grid of numbers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<f64>>,
}

impl Matrix {
    /// Build a matrix from rows. Returns `None` for an empty or ragged grid.
    pub fn new(cells: Vec<Vec<f64>>) -> Option<Self> {
        let rows = cells.len();
        let cols = cells.first()?.len();
        if cols == 0 || cells.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self { rows, cols, cells })
    }

    /// Single-column matrix.
    pub fn column(values: Vec<f64>) -> Option<Self> {
        Self::new(values.into_iter().map(|v| vec![v]).collect())
    }

    pub(crate) fn from_fn<F>(rows: usize, cols: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let cells = (0..rows)
            .map(|r| (0..cols).map(|c| f(r, c)).collect())
            .collect();
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape {
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn cells(&self) -> &[Vec<f64>] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row)?.get(col).copied()
    }

    /// A one-column matrix, the operand shape of dot and cross products.
    pub fn is_column_vector(&self) -> bool {
        self.cols == 1
    }

    pub fn contains_zero(&self) -> bool {
        self.cells.iter().flatten().any(|&cell| cell == 0.0)
    }

    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .map(|row| row.iter().map(|&cell| f(cell)).collect())
                .collect(),
        }
    }

    /// Cell-wise combination of two matrices of the same shape.
    pub(crate) fn zip_with<F>(&self, other: &Matrix, f: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        debug_assert_eq!(self.shape(), other.shape());
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(&other.cells)
                .map(|(a, b)| a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect())
                .collect(),
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", cell)?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}

/// The unitless part of a value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "lowercase"))]
pub enum Quantity {
    Number(f64),
    Matrix(Matrix),
}

impl Quantity {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Number,
            Self::Matrix(_) => ValueKind::Matrix,
        }
    }

    pub fn negate(&self) -> Quantity {
        match self {
            Self::Number(x) => Self::Number(-x),
            Self::Matrix(m) => Self::Matrix(m.map(|cell| -cell)),
        }
    }
}

impl From<Quantity> for ResultValue {
    fn from(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Number(x) => ResultValue::Number(x),
            Quantity::Matrix(m) => ResultValue::Matrix(m),
        }
    }
}

/// A quantity tagged with a non-empty unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitValue {
    units: UnitMap,
    value: Quantity,
}

impl UnitValue {
    pub fn units(&self) -> &UnitMap {
        &self.units
    }

    pub fn value(&self) -> &Quantity {
        &self.value
    }
}

/// The universal output of evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "lowercase"))]
pub enum ResultValue {
    Number(f64),
    Matrix(Matrix),
    Unit(UnitValue),
}

/// Variant tag of a value, used in error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueKind {
    Number,
    Matrix,
    Unit,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Number => "number",
            Self::Matrix => "matrix",
            Self::Unit => "unit",
        })
    }
}

impl ResultValue {
    /// Tag a number or matrix with `units`. An empty unit yields the bare
    /// quantity.
    pub fn with_units(value: impl Into<Quantity>, units: &UnitMap) -> ResultValue {
        Self::from_parts(units.clone(), value.into())
    }

    /// Reassemble a value split by [`ResultValue::into_parts`].
    pub fn from_parts(units: UnitMap, value: Quantity) -> ResultValue {
        if units.is_empty() {
            value.into()
        } else {
            ResultValue::Unit(UnitValue { units, value })
        }
    }

    /// Split into unit and unitless part; bare values have the empty unit.
    pub fn into_parts(self) -> (UnitMap, Quantity) {
        match self {
            Self::Number(x) => (UnitMap::new(), Quantity::Number(x)),
            Self::Matrix(m) => (UnitMap::new(), Quantity::Matrix(m)),
            Self::Unit(UnitValue { units, value }) => (units, value),
        }
    }

    /// Unit of the value, empty for bare numbers and matrices.
    pub fn units(&self) -> &UnitMap {
        match self {
            Self::Unit(u) => &u.units,
            _ => &DIMENSIONLESS,
        }
    }

    /// The value without its unit.
    pub fn strip_units(&self) -> Quantity {
        match self {
            Self::Number(x) => Quantity::Number(*x),
            Self::Matrix(m) => Quantity::Matrix(m.clone()),
            Self::Unit(u) => u.value.clone(),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Number,
            Self::Matrix(_) => ValueKind::Matrix,
            Self::Unit(_) => ValueKind::Unit,
        }
    }

    /// Negate every number in the value. The unit is left untouched.
    pub fn negate(&self) -> ResultValue {
        match self {
            Self::Number(x) => Self::Number(-x),
            Self::Matrix(m) => Self::Matrix(m.map(|cell| -cell)),
            Self::Unit(u) => Self::Unit(UnitValue {
                units: u.units.clone(),
                value: u.value.negate(),
            }),
        }
    }

    /// The number held by a bare `Number`, including zero.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(x) => Some(*x),
            _ => None,
        }
    }

    /// True for a bare, integer-valued `Number`.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Number(x) if x.is_finite() && x.round() == *x)
    }
}

impl Neg for ResultValue {
    type Output = ResultValue;

    fn neg(self) -> ResultValue {
        self.negate()
    }
}

impl From<f64> for ResultValue {
    fn from(value: f64) -> Self {
        ResultValue::Number(value)
    }
}

impl From<Matrix> for ResultValue {
    fn from(value: Matrix) -> Self {
        ResultValue::Matrix(value)
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::Number(value)
    }
}

impl From<Matrix> for Quantity {
    fn from(value: Matrix) -> Self {
        Quantity::Matrix(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) => write!(f, "{}", x),
            Self::Matrix(m) => write!(f, "{}", m),
        }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) => write!(f, "{}", x),
            Self::Matrix(m) => write!(f, "{}", m),
            Self::Unit(u) => write!(f, "{} {}", u.value, u.units),
        }
    }
}
