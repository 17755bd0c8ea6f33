use crate::base::*;
use crate::alphabet::{Alphabet, ListedAlphabet};

/// One contribution to a mixed alphabet.
#[derive(Debug, Clone)]
pub enum Source {
    /// A single code point.
    Point(u32),
    /// A literal symbol. A multi-character string used directly is one
    /// symbol, not a sequence.
    Literal(Symbol),
    /// A closed code-point range, inclusive on both ends, walked up or
    /// down from the first code point to the second.
    Range(u32, u32),
    /// An already-built alphabet contributing its whole declared base.
    Nested(Box<dyn Alphabet>),
}

impl Source {
    /// How many powers this source contributes to the combined alphabet.
    /// A dynamic nested alphabet still reserves exactly its declared base.
    fn arity(&self) -> usize {
        match self {
            Source::Point(_) | Source::Literal(_) => 1,
            Source::Range(from, to) => 1 + from.abs_diff(*to) as usize,
            Source::Nested(alpha) => alpha.base(),
        }
    }

    /// Resolves a batch of in-segment offsets. One call per segment per
    /// batch; a nested alphabet is consulted through its own batch lookup.
    fn resolve(&self, offsets: &[usize]) -> Vec<Option<Symbol>> {
        match self {
            Source::Point(cp) => offsets.iter()
                .map(|_| Symbol::from_code_point(*cp))
                .collect(),
            Source::Literal(sym) => offsets.iter()
                .map(|_| Some(sym.clone()))
                .collect(),
            Source::Range(from, to) => offsets.iter()
                .map(|&off| {
                    let cp = if to >= from { from + off as u32 } else { from - off as u32 };
                    Symbol::from_code_point(cp)
                })
                .collect(),
            Source::Nested(alpha) => alpha.symbols_at(offsets),
        }
    }
}

impl From<u32> for Source {
    fn from(cp: u32) -> Source {
        Source::Point(cp)
    }
}

impl From<char> for Source {
    fn from(ch: char) -> Source {
        Source::Point(ch as u32)
    }
}

impl From<&str> for Source {
    fn from(s: &str) -> Source {
        Source::Literal(Symbol::from(s))
    }
}

impl From<Symbol> for Source {
    fn from(sym: Symbol) -> Source {
        Source::Literal(sym)
    }
}

impl From<(u32, u32)> for Source {
    fn from((from, to): (u32, u32)) -> Source {
        Source::Range(from, to)
    }
}

impl From<(char, char)> for Source {
    fn from((from, to): (char, char)) -> Source {
        Source::Range(from as u32, to as u32)
    }
}

/// Only the first code point of each endpoint string is used.
impl From<(&str, &str)> for Source {
    fn from((from, to): (&str, &str)) -> Source {
        Source::Range(Symbol::from(from).first_code_point(), Symbol::from(to).first_code_point())
    }
}

impl From<ListedAlphabet> for Source {
    fn from(alpha: ListedAlphabet) -> Source {
        Source::Nested(Box::new(alpha))
    }
}

impl From<Box<dyn Alphabet>> for Source {
    fn from(alpha: Box<dyn Alphabet>) -> Source {
        Source::Nested(alpha)
    }
}

/// One source together with its cumulative upper-bound power within the
/// combined alphabet.
#[derive(Debug, Clone)]
struct Segment {
    source: Source,
    /// Exclusive: powers below this (and at or above the previous
    /// segment's bound) belong to this segment.
    bound: usize,
}

/// The combined alphabet produced by [`mix`].
#[derive(Debug, Clone)]
pub struct MixedAlphabet {
    segments: Vec<Segment>,
    base: usize,
}

/// Composes heterogeneous digit sources into one addressable alphabet.
/// The base is the sum of all contributions, in source order.
pub fn mix<S: Into<Source>>(sources: impl IntoIterator<Item = S>) -> MixedAlphabet {
    let mut segments = Vec::new();
    let mut bound = 0;
    for source in sources {
        let source = source.into();
        bound += source.arity();
        segments.push(Segment { source, bound });
    }
    MixedAlphabet { segments, base: bound }
}

impl MixedAlphabet {
    /// The index of the segment owning `power`, and the offset within it.
    /// Linear scan against the cumulative bounds.
    fn locate(&self, power: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for (ix, seg) in self.segments.iter().enumerate() {
            if power < seg.bound {
                return Some((ix, power - start));
            }
            start = seg.bound;
        }
        None
    }
}

impl Alphabet for MixedAlphabet {
    fn base(&self) -> usize {
        self.base
    }

    fn symbol_at(&self, power: usize) -> Option<Symbol> {
        let (ix, offset) = self.locate(power)?;
        self.segments[ix].source.resolve(&[offset]).pop().flatten()
    }

    /// Groups the queried powers by owning segment and invokes each
    /// segment's resolver once, then restores the query order.
    fn symbols_at(&self, powers: &[usize]) -> Vec<Option<Symbol>> {
        let mut result = vec![None; powers.len()];
        let mut groups: Vec<(Vec<usize>, Vec<usize>)> = vec![Default::default(); self.segments.len()];
        for (qx, &power) in powers.iter().enumerate() {
            if let Some((ix, offset)) = self.locate(power) {
                let (offsets, queries) = &mut groups[ix];
                offsets.push(offset);
                queries.push(qx);
            }
        }
        for (ix, (offsets, queries)) in groups.into_iter().enumerate() {
            if offsets.is_empty() {
                continue;
            }
            let symbols = self.segments[ix].source.resolve(&offsets);
            for (sym, qx) in symbols.into_iter().zip(queries) {
                result[qx] = sym;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        // range a..c (3 symbols), code point 5, literal "X"
        let mixed = mix([
            Source::from(('a', 'c')),
            Source::from(5u32),
            Source::from("X"),
        ]);
        assert_eq!(mixed.base(), 5);
        assert_eq!(mixed.symbol_at(0), Some(Symbol::from('a')));
        assert_eq!(mixed.symbol_at(1), Some(Symbol::from('b')));
        assert_eq!(mixed.symbol_at(2), Some(Symbol::from('c')));
        assert_eq!(mixed.symbol_at(3), Symbol::from_code_point(5));
        assert_eq!(mixed.symbol_at(4), Some(Symbol::from('X')));
        assert_eq!(mixed.symbol_at(5), None);
    }

    #[test]
    fn test_descending_range() {
        let mixed = mix([Source::from(('e', 'a'))]);
        assert_eq!(mixed.base(), 5);
        assert_eq!(mixed.symbol_at(0), Some(Symbol::from('e')));
        assert_eq!(mixed.symbol_at(4), Some(Symbol::from('a')));
    }

    #[test]
    fn test_string_endpoints() {
        // only the first code point of each endpoint string counts
        let mixed = mix([Source::from(("alpha", "delta"))]);
        assert_eq!(mixed.base(), 4);
        assert_eq!(mixed.symbol_at(3), Some(Symbol::from('d')));
    }

    #[test]
    fn test_multichar_literal() {
        // a multi-character string is one symbol, not a range or sequence
        let mixed = mix([Source::from("zero"), Source::from("one")]);
        assert_eq!(mixed.base(), 2);
        assert_eq!(mixed.symbol_at(0), Some(Symbol::Multi("zero".into())));
        assert_eq!(mixed.symbol_at(1), Some(Symbol::Multi("one".into())));
    }

    #[test]
    fn test_nested() {
        let inner = ListedAlphabet::new("xyz").unwrap();
        let mixed = mix([Source::from('0'), Source::from(inner)]);
        assert_eq!(mixed.base(), 4);
        assert_eq!(mixed.symbol_at(0), Some(Symbol::from('0')));
        assert_eq!(mixed.symbol_at(1), Some(Symbol::from('x')));
        assert_eq!(mixed.symbol_at(3), Some(Symbol::from('z')));
        assert_eq!(mixed.symbol_at(4), None);
    }

    #[test]
    fn test_nested_mixed() {
        let inner = mix([Source::from(('a', 'b')), Source::from('Z')]);
        let mixed = mix([Source::from(Box::new(inner) as Box<dyn Alphabet>), Source::from('9')]);
        assert_eq!(mixed.base(), 4);
        assert_eq!(mixed.symbol_at(2), Some(Symbol::from('Z')));
        assert_eq!(mixed.symbol_at(3), Some(Symbol::from('9')));
    }

    #[test]
    fn test_batch_order() {
        let mixed = mix([
            Source::from(('a', 'c')),
            Source::from(('0', '9')),
        ]);
        // interleaved queries across both segments, answers in query order
        assert_eq!(mixed.symbols_at(&[3, 0, 12, 1, 99]), vec![
            Some(Symbol::from('0')),
            Some(Symbol::from('a')),
            Some(Symbol::from('9')),
            Some(Symbol::from('b')),
            None,
        ]);
    }

    /// An alphabet whose declared base understates what it can resolve.
    #[derive(Debug, Clone)]
    struct Unbounded;

    impl Alphabet for Unbounded {
        fn base(&self) -> usize { 3 }

        fn symbol_at(&self, power: usize) -> Option<Symbol> {
            Symbol::from_code_point('a' as u32 + power as u32)
        }

        fn is_dynamic(&self) -> bool { true }
    }

    #[test]
    fn test_dynamic_arity() {
        // a dynamic sub-alphabet reserves exactly its declared base
        let mixed = mix([
            Source::Nested(Box::new(Unbounded)),
            Source::from('!'),
        ]);
        assert_eq!(mixed.base(), 4);
        assert_eq!(mixed.symbol_at(0), Some(Symbol::from('a')));
        assert_eq!(mixed.symbol_at(2), Some(Symbol::from('c')));
        // power 3 falls to the next segment even though the sub-alphabet
        // could resolve offset 3 on its own
        assert_eq!(mixed.symbol_at(3), Some(Symbol::from('!')));
        assert_eq!(mixed.symbol_at(4), None);
    }

    #[test]
    fn test_invalid_code_point() {
        let mixed = mix([Source::from(0xD800u32), Source::from('a')]);
        assert_eq!(mixed.base(), 2);
        assert_eq!(mixed.symbol_at(0), None); // surrogate, not a scalar value
        assert_eq!(mixed.symbol_at(1), Some(Symbol::from('a')));
    }
}
