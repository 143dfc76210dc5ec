//! Dense ranks for the distinct symbols of a text.
use crate::Char;

/// The sorted set of distinct symbols occurring in a text.
///
/// The rank of a symbol is its position in that set, so ranks are dense and start at 0. For a
/// terminated text the sentinel is the smallest symbol and therefore gets rank 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet<C> {
    symbols: Vec<C>,
}

impl<C: Char> Alphabet<C> {
    /// Collects the distinct symbols of `text`. An empty text gives an empty alphabet.
    ///
    /// # Example
    /// ```
    /// use sufidx::Alphabet;
    ///
    /// let alphabet = Alphabet::new(b"banana$");
    /// assert_eq!(alphabet.symbols(), b"$abn");
    /// assert_eq!(alphabet.rank(b'n'), Some(3));
    /// assert_eq!(alphabet.rank(b'z'), None);
    /// ```
    pub fn new(text: &[C]) -> Self {
        let mut symbols = text.to_vec();
        symbols.sort_unstable();
        symbols.dedup();
        Self { symbols }
    }

    /// Distinct symbols in ascending order.
    #[inline]
    pub fn symbols(&self) -> &[C] {
        &self.symbols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Rank of `c`, or `None` if `c` does not occur in the text.
    #[inline]
    pub fn rank(&self, c: C) -> Option<usize> {
        self.symbols.binary_search(&c).ok()
    }

    /// Maps every symbol of `text` to its rank.
    ///
    /// Every symbol of `text` must belong to the alphabet.
    pub fn ranks(&self, text: &[C]) -> Vec<usize> {
        text.iter()
            .map(|&c| match self.rank(c) {
                Some(r) => r,
                None => panic!("symbol {:?} is not part of the alphabet", c),
            })
            .collect()
    }
}
