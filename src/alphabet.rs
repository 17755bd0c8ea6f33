use crate::base::*;
use dyn_clone::DynClone;
use std::collections::HashSet;
use std::fmt::Debug;

/// The capability contract shared by every alphabet. A numeral system only
/// relies on this trait, never on a concrete alphabet type, so listed and
/// mixed alphabets (or caller-supplied ones) are interchangeable.
pub trait Alphabet: DynClone + Debug {
    /// The number of symbols this alphabet addresses; the radix of any
    /// numeral system built on it.
    fn base(&self) -> usize;

    /// The symbol standing for `power`, or `None` outside `[0, base)`.
    /// A [dynamic](Alphabet::is_dynamic) alphabet may resolve powers past
    /// `base()` as well.
    fn symbol_at(&self, power: usize) -> Option<Symbol>;

    /// Batch lookup. Results come back in the order of `powers`. The
    /// default implementation resolves each power independently; alphabets
    /// with per-lookup setup cost override this.
    fn symbols_at(&self, powers: &[usize]) -> Vec<Option<Symbol>> {
        powers.iter().map(|&p| self.symbol_at(p)).collect()
    }

    /// Whether `base()` is a declared bound rather than a hard ceiling on
    /// resolvable powers. Consumers must still treat `base()` as the
    /// number of reserved slots.
    fn is_dynamic(&self) -> bool {
        false
    }
}

dyn_clone::clone_trait_object!(Alphabet);

/// An alphabet created by explicitly listing its symbols in order.
#[derive(Debug, Clone)]
pub struct ListedAlphabet {
    symbols: Vec<Symbol>
}

impl ListedAlphabet {
    /// Builds an alphabet from the characters of `chars`, one symbol per
    /// code point (astral-plane characters count as one symbol). At least
    /// two distinct characters are required.
    pub fn new(chars: &str) -> Result<ListedAlphabet, Error> {
        chars.chars().map(Symbol::from).collect::<Vec<_>>().try_into()
    }
}

impl TryFrom<Vec<Symbol>> for ListedAlphabet {
    type Error = Error;

    fn try_from(symbols: Vec<Symbol>) -> Result<ListedAlphabet, Error> {
        if symbols.len() < 2 {
            return Err(Error::InvalidAlphabet("at least 2 symbols required".into()));
        }
        let mut seen = HashSet::new();
        for sym in &symbols {
            if !seen.insert(sym) {
                return Err(Error::InvalidAlphabet(format!("duplicate symbol '{sym}'")));
            }
        }
        Ok(ListedAlphabet { symbols })
    }
}

impl Alphabet for ListedAlphabet {
    fn base(&self) -> usize {
        self.symbols.len()
    }

    fn symbol_at(&self, power: usize) -> Option<Symbol> {
        self.symbols.get(power).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build() {
        let abc = ListedAlphabet::new("01").unwrap();
        assert_eq!(abc.base(), 2);
        assert_eq!(abc.symbol_at(0), Some(Symbol::from('0')));
        assert_eq!(abc.symbol_at(1), Some(Symbol::from('1')));
        assert_eq!(abc.symbol_at(2), None);
        assert!(!abc.is_dynamic());

        assert!(ListedAlphabet::new("").is_err());
        assert!(ListedAlphabet::new("a").is_err());
        assert!(ListedAlphabet::new("aa").is_err());
        assert!(ListedAlphabet::new("abca").is_err());

        // astral-plane characters are single symbols
        let abc = ListedAlphabet::new("𝟘𝟙𝟚").unwrap();
        assert_eq!(abc.base(), 3);
        assert_eq!(abc.symbol_at(2), Some(Symbol::from('𝟚')));
    }

    #[test]
    fn test_multichar_symbols() {
        let abc: ListedAlphabet = vec![
            Symbol::from('0'), Symbol::from('1'), Symbol::from("10")
        ].try_into().unwrap();
        assert_eq!(abc.base(), 3);
        assert_eq!(abc.symbol_at(2), Some(Symbol::Multi("10".into())));

        let dup: Result<ListedAlphabet, _> = vec![Symbol::from("ab"), Symbol::from("ab")].try_into();
        assert!(dup.is_err());
    }

    #[test]
    fn test_batch_default() {
        let abc = ListedAlphabet::new("abc").unwrap();
        assert_eq!(abc.symbols_at(&[2, 0, 5]),
            vec![Some(Symbol::from('c')), Some(Symbol::from('a')), None]);
    }
}
