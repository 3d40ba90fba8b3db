//! Compact unit notation.
//!
//! Symbols are joined with `.` (product) or `/` (quotient), both binding left
//! to right as in UCUM, and may carry a signed integer exponent suffix:
//! `kg.m/s2`, `m.s-2`, `1/s`. The empty string and `1` are dimensionless.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::map::{Exponent, UnitMap};

pub fn parse(text: &str) -> Result<UnitMap> {
    if !text.is_ascii() {
        return Err(Error::NonAscii);
    }
    if text.bytes().any(|b| b.is_ascii_whitespace()) {
        return Err(Error::ContainsWhitespace);
    }
    if text.is_empty() || text == "1" {
        return Ok(UnitMap::new());
    }
    Parser { text, pos: 0 }.parse()
}

impl FromStr for UnitMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn parse(mut self) -> Result<UnitMap> {
        let mut units = UnitMap::new();

        // Leading unity numerator: `1/s`.
        if self.text.starts_with("1/") {
            self.pos = 1;
        } else {
            self.term(&mut units, 1)?;
        }

        while let Some(op) = self.peek() {
            let sign = match op {
                b'.' => 1,
                b'/' => -1,
                _ => {
                    return Err(Error::Syntax {
                        pos: self.pos,
                        message: "expected '.' or '/'",
                    })
                }
            };
            self.pos += 1;
            self.term(&mut units, sign)?;
        }

        Ok(units)
    }

    fn term(&mut self, units: &mut UnitMap, sign: i64) -> Result<()> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if is_symbol_byte(b)) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(Error::Syntax {
                pos: start,
                message: "expected unit symbol",
            });
        }
        let symbol = &self.text[start..self.pos];
        let exponent = self.exponent()?;
        units
            .accumulate(symbol.to_string(), Exponent::from_integer(exponent * sign))
            .ok_or(Error::Overflow { pos: start })
    }

    fn exponent(&mut self) -> Result<i64> {
        let negative = match self.peek() {
            Some(b'-') => true,
            Some(b'+') => false,
            Some(b) if b.is_ascii_digit() => false,
            _ => return Ok(1),
        };
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }

        let start = self.pos;
        let mut value: i64 = 0;
        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(b - b'0')))
                .ok_or(Error::Overflow { pos: start })?;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(Error::Syntax {
                pos: start,
                message: "expected exponent digits",
            });
        }

        Ok(if negative { -value } else { value })
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }
}

fn is_symbol_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || matches!(b, b'_' | b'[' | b']' | b'%' | b'\'')
}
