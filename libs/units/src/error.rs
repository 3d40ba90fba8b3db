use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unit expression must be ASCII")]
    NonAscii,

    #[error("unit expression must not contain whitespace")]
    ContainsWhitespace,

    #[error("invalid unit syntax at byte {pos}: {message}")]
    Syntax { pos: usize, message: &'static str },

    #[error("exponent overflow at byte {pos}")]
    Overflow { pos: usize },
}
