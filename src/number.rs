use crate::base::*;
use crate::digits::{DigitWalk, Digits};
use crate::system::{NumeralSystem, Optimization};
use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};

/// The digit memo of one number. Selected once at construction from the
/// owning system's optimization mode; `Sparse` promotes to `Dense` exactly
/// once, when every position has been seen.
#[derive(Debug, Clone)]
pub(crate) enum DigitCache {
    Off,
    Sparse(HashMap<usize, usize>),
    Dense(Vec<usize>),
}

impl DigitCache {
    fn lookup(&self, position: usize) -> Option<usize> {
        match self {
            DigitCache::Off => None,
            DigitCache::Sparse(map) => map.get(&position).copied(),
            DigitCache::Dense(vec) => vec.get(position).copied(),
        }
    }
}

/// Promotes a fully populated sparse memo to the dense form. Runs after
/// every write; the switch is one-way.
pub(crate) fn promote_if_complete(cache: &mut DigitCache, digit_count: usize) {
    if let DigitCache::Sparse(map) = cache {
        if map.len() == digit_count {
            let dense = (0..digit_count).map(|ix| map[&ix]).collect();
            *cache = DigitCache::Dense(dense);
        }
    }
}

/// A non-negative arbitrary-precision integer tied to the numeral system
/// it is displayed in. The value never changes; digit lookups only
/// populate the cache. Cloning snapshots the cache, so a clone and its
/// original never observe each other's later lookups.
#[derive(Clone)]
pub struct PositionalNumber {
    value: UNumber,
    system: NumeralSystem,
    digit_count: OnceCell<usize>,
    cache: RefCell<DigitCache>,
}

impl PositionalNumber {
    pub(crate) fn new(value: UNumber, system: NumeralSystem) -> PositionalNumber {
        let cache = match system.optimization() {
            Optimization::Memory => DigitCache::Off,
            Optimization::Performance => DigitCache::Sparse(HashMap::new()),
        };
        PositionalNumber {
            value,
            system,
            digit_count: OnceCell::new(),
            cache: RefCell::new(cache),
        }
    }

    /// The same value under `system`, which must share this number's
    /// base. The cache state follows the new system's mode; a snapshot of
    /// the digits seen so far comes along where the mode keeps them.
    pub(crate) fn rebind(&self, system: NumeralSystem) -> PositionalNumber {
        let cache = match system.optimization() {
            Optimization::Memory => DigitCache::Off,
            Optimization::Performance => match &*self.cache.borrow() {
                DigitCache::Off => DigitCache::Sparse(HashMap::new()),
                kept => kept.clone(),
            },
        };
        PositionalNumber {
            value: self.value.clone(),
            system,
            digit_count: self.digit_count.clone(),
            cache: RefCell::new(cache),
        }
    }

    pub fn value(&self) -> &UNumber {
        &self.value
    }

    pub fn system(&self) -> &NumeralSystem {
        &self.system
    }

    /// The minimal number of digits the value occupies in this system's
    /// base; 1 for zero. Computed once, by repeated division starting from
    /// the best lower bound the cache provides.
    pub fn digit_count(&self) -> usize {
        *self.digit_count.get_or_init(|| {
            let base = self.system.big_base();
            let mut count = match &*self.cache.borrow() {
                DigitCache::Sparse(map) => map.keys().max().map_or(1, |hi| hi + 1),
                _ => 1,
            };
            let mut quot = &self.value / base.pow(count as u32);
            while quot > *ZERO {
                quot /= base;
                count += 1;
            }
            count
        })
    }

    /// The digit at `position`, counted from the most significant digit at
    /// position 0. `None` outside `[0, digit_count())`.
    pub fn digit_at(&self, position: isize) -> Option<usize> {
        if position < 0 {
            return None;
        }
        let position = position as usize;
        if position >= self.digit_count() {
            return None;
        }
        if let Some(digit) = self.cache.borrow().lookup(position) {
            return Some(digit);
        }
        let digit = self.extract(position);
        self.note_digit(position, digit);
        Some(digit)
    }

    /// Standard positional extraction of one digit.
    fn extract(&self, position: usize) -> usize {
        let base = self.system.big_base();
        let low = base.pow((self.digit_count() - position - 1) as u32);
        let digit = (&self.value % (&low * base)) / low;
        digit.to_usize().expect("digit is below base")
    }

    /// Memoizes a computed digit if this number keeps a cache, then checks
    /// for the sparse→dense switch.
    pub(crate) fn note_digit(&self, position: usize, digit: usize) {
        let count = self.digit_count();
        let mut cache = self.cache.borrow_mut();
        match &mut *cache {
            DigitCache::Sparse(map) => { map.insert(position, digit); },
            _ => return,
        }
        promote_if_complete(&mut cache, count);
    }

    pub(crate) fn cached_digit(&self, position: usize) -> Option<usize> {
        self.cache.borrow().lookup(position)
    }

    pub(crate) fn is_dense(&self) -> bool {
        matches!(&*self.cache.borrow(), DigitCache::Dense(_))
    }

    #[cfg(test)]
    pub(crate) fn is_sparse(&self) -> bool {
        matches!(&*self.cache.borrow(), DigitCache::Sparse(_))
    }

    /// A fresh lazy walk over this number's digits. The number itself is
    /// never consumed; each call starts over.
    pub fn digits_from(&self, walk: DigitWalk) -> Digits<'_> {
        Digits::new(self, walk)
    }

    /// All digits, most significant first.
    pub fn digits(&self) -> Digits<'_> {
        self.digits_from(DigitWalk::default())
    }

    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl Display for PositionalNumber {
    /// Renders through the alphabet, most significant digit first. Plain
    /// decimal systems take the direct big-integer path instead.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.system.decimal_shortcut() {
            return write!(f, "{}", self.value);
        }
        let alphabet = self.system.alphabet();
        for digit in self.digits() {
            let digit = digit.expect("whole-number walk stays in range");
            match alphabet.symbol_at(digit) {
                Some(sym) => write!(f, "{sym}")?,
                None => write!(f, "\u{fffd}")?,
            }
        }
        Ok(())
    }
}

impl Debug for PositionalNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (base {})", self.value, self.system.base())
    }
}

/// Numbers compare by underlying value alone; the systems they belong to
/// play no part.
impl PartialEq for PositionalNumber {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for PositionalNumber { }

impl PartialOrd for PositionalNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PositionalNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}
