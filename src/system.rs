use crate::base::*;
use crate::alphabet::{Alphabet, ListedAlphabet};
use crate::number::PositionalNumber;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// The digit-caching strategy applied to numbers created by a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Optimization {
    /// No digit cache; every lookup recomputes via big-integer division.
    #[default]
    Memory,
    /// Digits are memoized per position. Once every position has been
    /// seen, the cache switches to a dense array, permanently.
    Performance,
}

struct SystemInner {
    alphabet: Box<dyn Alphabet>,
    big_base: UNumber,
    optimization: Optimization,
    /// The alphabet is literally '0'..'9', so decimal rendering may take
    /// the direct big-integer-to-string path.
    decimal: bool,
}

/// A positional numeral system: an alphabet together with arithmetic on
/// numbers expressed in it. Cheap to clone; clones refer to the same
/// system, and numbers remember which system created them.
#[derive(Clone)]
pub struct NumeralSystem {
    inner: Rc<SystemInner>,
}

impl NumeralSystem {
    /// A memory-optimized system over `alphabet`.
    pub fn new(alphabet: impl Alphabet + 'static) -> Result<NumeralSystem, Error> {
        Self::with_optimization(alphabet, Optimization::default())
    }

    pub fn with_optimization(alphabet: impl Alphabet + 'static, optimization: Optimization)
        -> Result<NumeralSystem, Error>
    {
        let base = alphabet.base();
        if base < 2 {
            return Err(Error::InvalidAlphabet(format!("base {base} is not positional")));
        }
        let decimal = base == 10 && (0..10).all(|d|
            alphabet.symbol_at(d) == Some(Symbol::Single(char::from(b'0' + d as u8))));
        Ok(NumeralSystem { inner: Rc::new(SystemInner {
            alphabet: Box::new(alphabet),
            big_base: UNumber::from(base),
            optimization,
            decimal,
        })})
    }

    /// Builds the alphabet from the characters of `chars` first.
    pub fn from_characters(chars: &str, optimization: Optimization) -> Result<NumeralSystem, Error> {
        Self::with_optimization(ListedAlphabet::new(chars)?, optimization)
    }

    pub fn base(&self) -> usize {
        self.inner.alphabet.base()
    }

    pub fn alphabet(&self) -> &dyn Alphabet {
        &*self.inner.alphabet
    }

    pub fn optimization(&self) -> Optimization {
        self.inner.optimization
    }

    pub(crate) fn big_base(&self) -> &UNumber {
        &self.inner.big_base
    }

    pub(crate) fn decimal_shortcut(&self) -> bool {
        self.inner.decimal
    }

    /// Two handles denote the same system if they share the inner state.
    pub fn same_as(&self, other: &NumeralSystem) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Wraps a non-negative integer into this system.
    pub fn number(&self, value: impl Into<UNumber>) -> PositionalNumber {
        PositionalNumber::new(value.into(), self.clone())
    }

    /// Parses a base-10 digit string.
    pub fn number_from_decimal(&self, digits: &str) -> Result<PositionalNumber, Error> {
        let value = digits.parse::<UNumber>()
            .map_err(|_| Error::MalformedNumber(digits.to_string()))?;
        Ok(self.number(value))
    }

    /// Assembles a number from per-position digits, most significant
    /// first, each below this system's base. An empty array is the value
    /// zero (one digit).
    pub fn number_from_digits(&self, digits: &[usize]) -> Result<PositionalNumber, Error> {
        let base = self.base();
        if let Some(&digit) = digits.iter().find(|&&d| d >= base) {
            return Err(Error::InvalidDigit { digit, base });
        }
        Ok(self.number(digits_to_value(digits, base)))
    }

    /// Re-wraps `other` into this system. A source of the same base
    /// brings its digit caches along as a snapshot; a source of a
    /// different base contributes only its raw value.
    pub fn adopt(&self, other: &PositionalNumber) -> PositionalNumber {
        if other.system().base() == self.base() {
            other.rebind(self.clone())
        } else {
            self.number(other.value().clone())
        }
    }

    /// An operand is usable if it was made by this system or by one of
    /// equal base; anything else has no defined coercion.
    fn member<'num>(&self, number: &'num PositionalNumber) -> Result<&'num UNumber, Error> {
        if self.same_as(number.system()) || number.system().base() == self.base() {
            Ok(number.value())
        } else {
            Err(Error::CrossSystem { left: self.base(), right: number.system().base() })
        }
    }

    pub fn add(&self, lhs: &PositionalNumber, rhs: &PositionalNumber)
        -> Result<PositionalNumber, Error>
    {
        Ok(self.number(self.member(lhs)? + self.member(rhs)?))
    }

    /// `Ok(None)` when the difference would be negative. The intermediate
    /// is computed signed and rejected on sign, not clamped.
    pub fn subtract(&self, lhs: &PositionalNumber, rhs: &PositionalNumber)
        -> Result<Option<PositionalNumber>, Error>
    {
        let diff = Number::from(self.member(lhs)?.clone()) - Number::from(self.member(rhs)?.clone());
        Ok(UNumber::try_from(diff).ok().map(|value| self.number(value)))
    }

    pub fn multiply(&self, lhs: &PositionalNumber, rhs: &PositionalNumber)
        -> Result<PositionalNumber, Error>
    {
        Ok(self.number(self.member(lhs)? * self.member(rhs)?))
    }

    /// Integer division, truncating toward zero.
    pub fn divide(&self, lhs: &PositionalNumber, rhs: &PositionalNumber)
        -> Result<PositionalNumber, Error>
    {
        let (lhs, rhs) = (self.member(lhs)?, self.member(rhs)?);
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(self.number(lhs / rhs))
    }

    pub fn remainder(&self, lhs: &PositionalNumber, rhs: &PositionalNumber)
        -> Result<PositionalNumber, Error>
    {
        let (lhs, rhs) = (self.member(lhs)?, self.member(rhs)?);
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(self.number(lhs % rhs))
    }
}

impl Debug for NumeralSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "NumeralSystem(base {}, {:?})", self.base(), self.optimization())
    }
}

/// The digits of `value` in base `base`, most significant first. Zero
/// gives a single `0` digit. Independent of any system instance.
pub fn value_to_digits(value: &UNumber, base: usize) -> Vec<usize> {
    if let Ok(radix) = u32::try_from(base) {
        if (2..=256).contains(&radix) {
            return value.to_radix_be(radix).into_iter().map(<usize as From<u8>>::from).collect();
        }
    }
    let big = UNumber::from(base);
    let mut digits = Vec::new();
    let mut rest = value.clone();
    loop {
        let (quot, rem) = rest.div_rem(&big);
        digits.push(rem.to_usize().expect("remainder is below base"));
        if quot.is_zero() {
            break;
        }
        rest = quot;
    }
    digits.reverse();
    digits
}

/// The inverse of [`value_to_digits`]: interprets `digits` (most
/// significant first, each below `base`) as a value. Its `Display` form is
/// the decimal string. An empty array is zero.
pub fn digits_to_value(digits: &[usize], base: usize) -> UNumber {
    if let Ok(radix) = u32::try_from(base) {
        if (2..=256).contains(&radix) {
            if let Ok(bytes) = digits.iter().map(|&d| u8::try_from(d)).collect::<Result<Vec<u8>, _>>() {
                if let Some(value) = UNumber::from_radix_be(&bytes, radix) {
                    return value;
                }
            }
        }
    }
    let big = UNumber::from(base);
    digits.iter().fold(ZERO.clone(), |acc, &d| acc * &big + UNumber::from(d))
}
