#![forbid(unsafe_code)]

//! Unit exponent maps.
//!
//! A [`UnitMap`] tags a value with a physical dimension, written as a mapping
//! from unit symbol to exponent (`m/s2` is `{m: 1, s: -2}`). Every operation
//! here is pure and never panics: arithmetic whose exponent would not fit
//! returns `None`, and callers decide what that means for them.

mod error;
mod map;
mod parser;

pub use error::{Error, Result};
pub use map::{Exponent, UnitMap, MAX_POWF_DENOMINATOR, POWF_TOLERANCE};
pub use parser::parse;
