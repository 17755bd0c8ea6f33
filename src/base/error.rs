use std::fmt::{Display, Formatter};

/// The error type reported by alphabet, system and number construction.
///
/// Conditions which arise in routine use and are checked by the caller —
/// a digit position outside the number, a subtraction dipping below zero —
/// are not part of this type; the respective operations express them as
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An alphabet with fewer than two symbols, or with duplicates.
    InvalidAlphabet(String),
    /// A digit-array entry outside `[0, base)`.
    InvalidDigit { digit: usize, base: usize },
    /// An operand from a system of a different base, for which no value
    /// coercion is defined.
    CrossSystem { left: usize, right: usize },
    /// A decimal string which does not parse as a non-negative integer.
    MalformedNumber(String),
    /// Division or remainder with a zero divisor.
    DivisionByZero,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAlphabet(reason) => write!(f, "invalid alphabet: {reason}"),
            Self::InvalidDigit { digit, base } => write!(f, "digit {digit} out of range for base {base}"),
            Self::CrossSystem { left, right } => write!(f, "operands from incompatible systems (base {left} vs base {right})"),
            Self::MalformedNumber(input) => write!(f, "malformed number \"{input}\""),
            Self::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for Error { }
