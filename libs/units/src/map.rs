use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, One, Zero};

/// Exponent of a single unit symbol.
///
/// Multiplication, division and integer powers keep exponents integral; roots
/// may leave a fractional exponent behind (`sqrt(m)` is `m^(1/2)`).
pub type Exponent = Rational64;

/// Mapping from unit symbol to its (non-zero) exponent.
///
/// Zero exponents are pruned on every construction path, so two maps describe
/// the same unit exactly when they compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "BTreeMap<String, Exponent>",
        into = "BTreeMap<String, Exponent>"
    )
)]
pub struct UnitMap {
    exponents: BTreeMap<String, Exponent>,
}

impl UnitMap {
    /// The dimensionless unit.
    pub const fn new() -> Self {
        Self {
            exponents: BTreeMap::new(),
        }
    }

    /// A single base symbol with exponent 1 (`m`, `s`, `kg`).
    pub fn base(symbol: impl Into<String>) -> Self {
        Self::new().with_exponent(symbol, 1)
    }

    /// Builder: add `exponent` to the exponent already stored for `symbol`.
    ///
    /// A sum that does not fit an [`Exponent`] leaves the map unchanged; use
    /// [`UnitMap::multiply`] when the caller needs to see the overflow.
    pub fn with_exponent(self, symbol: impl Into<String>, exponent: i64) -> Self {
        self.with_ratio(symbol, Exponent::from_integer(exponent))
    }

    /// Builder taking a rational exponent.
    pub fn with_ratio(mut self, symbol: impl Into<String>, exponent: Exponent) -> Self {
        // Overflow keeps the previous exponent.
        let _ = self.accumulate(symbol.into(), exponent);
        self
    }

    /// Exponent of `symbol`, zero when absent.
    pub fn get(&self, symbol: &str) -> Exponent {
        self.exponents
            .get(symbol)
            .copied()
            .unwrap_or_else(Exponent::zero)
    }

    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Exponent)> + '_ {
        self.exponents.iter().map(|(symbol, exp)| (symbol.as_str(), *exp))
    }

    /// Structural unit equality: identical symbols with identical exponents.
    pub fn same_unit(&self, other: &UnitMap) -> bool {
        self == other
    }

    /// Combine two maps symbol by symbol.
    ///
    /// `op` sees the exponent from each side for every symbol present in
    /// either map, with a missing exponent treated as zero. Zero results are
    /// dropped. Returns `None` as soon as `op` does.
    pub fn combine<F>(&self, other: &UnitMap, op: F) -> Option<UnitMap>
    where
        F: Fn(Exponent, Exponent) -> Option<Exponent>,
    {
        let mut out = UnitMap::new();
        for (symbol, exp) in &self.exponents {
            out.insert(symbol.clone(), op(*exp, other.get(symbol))?);
        }
        for (symbol, exp) in &other.exponents {
            if self.exponents.contains_key(symbol) {
                continue;
            }
            out.insert(symbol.clone(), op(Exponent::zero(), *exp)?);
        }
        Some(out)
    }

    /// Unit of a product: exponents add. `None` on exponent overflow.
    pub fn multiply(&self, other: &UnitMap) -> Option<UnitMap> {
        self.combine(other, |a, b| a.checked_add(&b))
    }

    /// Unit of a quotient: exponents subtract. `None` on exponent overflow.
    pub fn divide(&self, other: &UnitMap) -> Option<UnitMap> {
        self.combine(other, |a, b| a.checked_sub(&b))
    }

    /// Apply `f` to every exponent, pruning any that become zero.
    pub fn map<F>(&self, f: F) -> Option<UnitMap>
    where
        F: Fn(Exponent) -> Option<Exponent>,
    {
        let mut out = UnitMap::new();
        for (symbol, exp) in &self.exponents {
            out.insert(symbol.clone(), f(*exp)?);
        }
        Some(out)
    }

    /// Unit of `x^factor`.
    pub fn scale(&self, factor: Exponent) -> Option<UnitMap> {
        self.map(|exp| exp.checked_mul(&factor))
    }

    /// Unit of `x^power` for a floating-point power.
    ///
    /// The power must lie within [`POWF_TOLERANCE`] of a fraction whose
    /// denominator is at most [`MAX_POWF_DENOMINATOR`] (`0.5`, `1.5`,
    /// `0.333333333`); anything else has no exact unit and yields `None`.
    pub fn powf(&self, power: f64) -> Option<UnitMap> {
        if self.is_empty() {
            return Some(UnitMap::new());
        }
        self.scale(exponent_from_f64(power)?)
    }

    /// Unit of the `index`-th root.
    pub fn root(&self, index: NonZeroU32) -> Option<UnitMap> {
        let index = Exponent::from_integer(i64::from(index.get()));
        self.map(|exp| exp.checked_div(&index))
    }

    fn insert(&mut self, symbol: String, exponent: Exponent) {
        if exponent.is_zero() {
            self.exponents.remove(&symbol);
        } else {
            self.exponents.insert(symbol, exponent);
        }
    }

    /// Add `exponent` to the stored exponent of `symbol`. `None` on overflow,
    /// in which case the map is left as it was.
    pub(crate) fn accumulate(&mut self, symbol: String, exponent: Exponent) -> Option<()> {
        let total = self.get(&symbol).checked_add(&exponent)?;
        self.insert(symbol, total);
        Some(())
    }
}

/// Largest denominator [`UnitMap::powf`] accepts.
pub const MAX_POWF_DENOMINATOR: i64 = 100;

/// Distance from a fraction within which [`UnitMap::powf`] snaps to it.
pub const POWF_TOLERANCE: f64 = 1e-9;

/// The simplest fraction within [`POWF_TOLERANCE`] of `value`, searching
/// denominators up to [`MAX_POWF_DENOMINATOR`].
fn exponent_from_f64(value: f64) -> Option<Exponent> {
    if !value.is_finite() {
        return None;
    }
    (1..=MAX_POWF_DENOMINATOR).find_map(|denom| {
        let scaled = value * denom as f64;
        let numer = scaled.round();
        let fits = numer.abs() < i64::MAX as f64;
        (fits && (numer / denom as f64 - value).abs() <= POWF_TOLERANCE)
            .then(|| Exponent::new(numer as i64, denom))
    })
}

impl<S: Into<String>> FromIterator<(S, i64)> for UnitMap {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(UnitMap::new(), |out, (symbol, exp)| out.with_exponent(symbol, exp))
    }
}

impl From<BTreeMap<String, Exponent>> for UnitMap {
    fn from(exponents: BTreeMap<String, Exponent>) -> Self {
        // Keys are unique, so every entry lands as is.
        let mut out = UnitMap::new();
        for (symbol, exp) in exponents {
            out.insert(symbol, exp);
        }
        out
    }
}

impl From<UnitMap> for BTreeMap<String, Exponent> {
    fn from(units: UnitMap) -> Self {
        units.exponents
    }
}

impl fmt::Display for UnitMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("1");
        }
        for (idx, (symbol, exp)) in self.exponents.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            f.write_str(symbol)?;
            if !exp.is_integer() {
                write!(f, "^({})", exp)?;
            } else if !exp.is_one() {
                write!(f, "{}", exp.to_integer())?;
            }
        }
        Ok(())
    }
}
