pub(crate) use num::*;

mod error;
mod symbol;

pub use error::*;
pub use symbol::*;

use once_cell::sync::Lazy;

/// The base type for signed arbitrary-precision arithmetic. Only used for
/// intermediate results which may dip below zero; every publicly visible
/// value is an [`UNumber`].
pub type Number = num::BigInt;

/// The unsigned variant of the [`Number`] type. All digit values, bases and
/// wrapped number values use this.
pub type UNumber = num::BigUint;

/// Shared zero, allocated once per process.
pub(crate) static ZERO: Lazy<UNumber> = Lazy::new(UNumber::zero);
