pub mod base;
mod alphabet;
mod digits;
mod mixer;
mod number;
mod system;

pub use alphabet::{Alphabet, ListedAlphabet};
pub use digits::{DigitWalk, Digits};
pub use mixer::{mix, MixedAlphabet, Source};
pub use number::PositionalNumber;
pub use system::{digits_to_value, value_to_digits, NumeralSystem, Optimization};
