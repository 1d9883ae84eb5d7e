use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::lowercase;
use crate::{Result, TextErr};

/// A single entry of an `Alphabet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// The character this symbol decodes to, it also encodes to this symbol.
    pub glyph: char,
    /// Other characters that encode to this symbol.
    #[serde(default)]
    pub aliases: Vec<char>,
}

impl Symbol {
    pub fn new(glyph: char) -> Self {
        Self {
            glyph,
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases<I>(glyph: char, aliases: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self {
            glyph,
            aliases: aliases.into_iter().collect(),
        }
    }
}

/// The fixed, ordered set of symbols the network reads and writes.
///
/// Maps characters to dense indices in `[0, K)` and back. The mapping is total: any character
/// without a symbol is reported as `TextErr::OutOfAlphabet`.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Creates a new `Alphabet`.
    ///
    /// # Arguments
    /// * `symbols` - The symbols, the position of each being its index.
    ///
    /// # Returns
    /// The alphabet or `TextErr::InvalidConfig` if it is empty, a character appears twice or a
    /// character is not lowercase. Streams are lowercased before lookup, so an uppercase
    /// character could never be read back.
    pub fn new<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = Symbol>,
    {
        let symbols: Vec<_> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(TextErr::InvalidConfig("the alphabet is empty".into()));
        }

        let mut index = HashMap::new();
        for (i, symbol) in symbols.iter().enumerate() {
            for &c in std::iter::once(&symbol.glyph).chain(&symbol.aliases) {
                if lowercase(c) != c {
                    return Err(TextErr::InvalidConfig(format!(
                        "character {c:?} of symbol {i} is not lowercase"
                    )));
                }

                if let Some(prev) = index.insert(c, i) {
                    return Err(TextErr::InvalidConfig(format!(
                        "character {c:?} is mapped by both symbol {prev} and symbol {i}"
                    )));
                }
            }
        }

        Ok(Self { symbols, index })
    }

    /// The 28 symbol alphabet: `a`-`z`, space (newline and carriage return fold into it) and
    /// period.
    pub fn standard() -> Self {
        let symbols = letters().chain([
            Symbol::with_aliases(' ', ['\n', '\r']),
            Symbol::new('.'),
        ]);

        Self::from_preset(symbols)
    }

    /// The 30 symbol alphabet: `a`-`z`, space, period, newline (carriage return folds into it)
    /// and comma.
    pub fn extended() -> Self {
        let symbols = letters().chain([
            Symbol::new(' '),
            Symbol::new('.'),
            Symbol::with_aliases('\n', ['\r']),
            Symbol::new(','),
        ]);

        Self::from_preset(symbols)
    }

    fn from_preset<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        match Self::new(symbols) {
            Ok(alphabet) => alphabet,
            Err(e) => unreachable!("invalid preset alphabet: {e}"),
        }
    }

    /// Returns `K`, the amount of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    /// Maps a character to the index of its symbol.
    ///
    /// The lookup is exact, callers lowercase beforehand.
    pub fn encode(&self, c: char) -> Result<usize> {
        self.index.get(&c).copied().ok_or(TextErr::OutOfAlphabet(c))
    }

    /// Maps an index back to the glyph of its symbol.
    pub fn decode(&self, index: usize) -> Result<char> {
        self.symbols
            .get(index)
            .map(|s| s.glyph)
            .ok_or(TextErr::DimensionMismatch {
                what: "symbol index",
                got: index,
                expected: self.len(),
            })
    }
}

fn letters() -> impl Iterator<Item = Symbol> {
    ('a'..='z').map(Symbol::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout() {
        let alphabet = Alphabet::standard();

        assert_eq!(alphabet.len(), 28);
        assert_eq!(alphabet.encode('a').unwrap(), 0);
        assert_eq!(alphabet.encode('z').unwrap(), 25);
        assert_eq!(alphabet.encode(' ').unwrap(), 26);
        assert_eq!(alphabet.encode('\n').unwrap(), 26);
        assert_eq!(alphabet.encode('\r').unwrap(), 26);
        assert_eq!(alphabet.encode('.').unwrap(), 27);
    }

    #[test]
    fn extended_layout() {
        let alphabet = Alphabet::extended();

        assert_eq!(alphabet.len(), 30);
        assert_eq!(alphabet.encode(' ').unwrap(), 26);
        assert_eq!(alphabet.encode('.').unwrap(), 27);
        assert_eq!(alphabet.encode('\n').unwrap(), 28);
        assert_eq!(alphabet.encode('\r').unwrap(), 28);
        assert_eq!(alphabet.encode(',').unwrap(), 29);
        assert_eq!(alphabet.decode(28).unwrap(), '\n');
    }

    #[test]
    fn letters_do_not_collide_with_punctuation() {
        let alphabet = Alphabet::extended();
        let z = alphabet.encode('z').unwrap();

        for c in [' ', '.', '\n', ','] {
            assert_ne!(alphabet.encode(c).unwrap(), z);
        }
    }

    #[test]
    fn decode_inverts_encode() {
        let alphabet = Alphabet::extended();

        for i in 0..alphabet.len() {
            let c = alphabet.decode(i).unwrap();
            assert_eq!(alphabet.encode(c).unwrap(), i);
        }
    }

    #[test]
    fn out_of_alphabet() {
        let alphabet = Alphabet::standard();

        for c in ['A', '7', ',', '!', 'é'] {
            assert!(!alphabet.contains(c));
            assert!(matches!(alphabet.encode(c), Err(TextErr::OutOfAlphabet(x)) if x == c));
        }
    }

    #[test]
    fn decode_out_of_range() {
        assert!(matches!(
            Alphabet::standard().decode(28),
            Err(TextErr::DimensionMismatch { got: 28, expected: 28, .. })
        ));
    }

    #[test]
    fn custom_alphabet() {
        let alphabet =
            Alphabet::new([Symbol::new('a'), Symbol::with_aliases('-', ['_', ' '])]).unwrap();

        assert_eq!(alphabet.len(), 2);
        assert_eq!(alphabet.encode('_').unwrap(), 1);
        assert_eq!(alphabet.decode(1).unwrap(), '-');
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        assert!(matches!(
            Alphabet::new([Symbol::new('a'), Symbol::with_aliases('b', ['a'])]),
            Err(TextErr::InvalidConfig(_))
        ));
        assert!(matches!(
            Alphabet::new(Vec::new()),
            Err(TextErr::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_uppercase_characters() {
        assert!(matches!(
            Alphabet::new([Symbol::new('B'), Symbol::new('a')]),
            Err(TextErr::InvalidConfig(_))
        ));
        assert!(matches!(
            Alphabet::new([Symbol::with_aliases('a', ['A'])]),
            Err(TextErr::InvalidConfig(_))
        ));
        assert!(Alphabet::new([Symbol::new('b'), Symbol::new('a')]).is_ok());
    }

    #[test]
    fn presets_map_every_alias() {
        for alphabet in [Alphabet::standard(), Alphabet::extended()] {
            for (i, symbol) in alphabet.symbols().iter().enumerate() {
                for &c in &symbol.aliases {
                    assert_eq!(alphabet.encode(c).unwrap(), i);
                }
            }
        }
    }
}
