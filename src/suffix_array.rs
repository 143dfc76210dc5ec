//! Suffix arrays with their LCP arrays, and pattern search over them.
use crate::config::Strategy;
use crate::tree::{PositionalSuffixTree, SuffixTree};
use crate::{doubling, is_terminated, lcp, Char};
use contracts::*;
use std::cmp::Ordering;

/// A suffix array together with its LCP array, borrowing the text it indexes.
#[derive(Clone, Debug)]
pub struct SuffixArray<'t, C> {
    text: &'t [C],
    table: Vec<usize>,
    lcp: Vec<usize>,
}

impl<'t, C: Char> SuffixArray<'t, C> {
    /// Creates a new `SuffixArray` for `text` with the default [`Strategy`].
    ///
    /// Note that `text` MUST end with a sentinel: a symbol smaller than every other symbol that
    /// occurs nowhere else.
    ///
    /// This operation is *O*(*n* log *n*).
    ///
    /// # Panics
    ///
    /// Panics if `text` is not terminated by a sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufidx::SuffixArray;
    ///
    /// let sa = SuffixArray::new(b"Hello, world!\0");
    /// assert!(sa.contains(b"world"));
    /// ```
    pub fn new(text: &'t [C]) -> Self {
        Self::with_strategy(text, Strategy::default())
    }

    /// Creates a new `SuffixArray` for `text`, sorting the suffixes with `strategy`.
    #[requires(is_terminated(text), "last character is unique and minimum")]
    pub fn with_strategy(text: &'t [C], strategy: Strategy) -> Self {
        let table = doubling::suffix_array_with(text, strategy);
        let lcp = lcp::kasai(text, &table);
        Self { text, table, lcp }
    }

    #[inline]
    pub fn text(&self) -> &'t [C] {
        self.text
    }

    /// Suffix start offsets in lexicographic order of the suffixes.
    #[inline]
    pub fn table(&self) -> &[usize] {
        &self.table
    }

    /// `lcp()[i]` is the common prefix length of the suffixes at `table()[i]` and
    /// `table()[i + 1]`.
    #[inline]
    pub fn lcp(&self) -> &[usize] {
        &self.lcp
    }

    /// Position of every suffix in the table: `rank()[table()[i]] == i`.
    pub fn rank(&self) -> Vec<usize> {
        lcp::inverse(&self.table)
    }

    /// Returns the number of suffixes, sentinel included.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the `i`-th smallest suffix.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn suffix(&self, i: usize) -> &'t [C] {
        &self.text[self.table[i]..]
    }

    /// Returns `true` if and only if `pattern` is contained in the text.
    ///
    /// This operation is *O*(*m* \* log(*n*)), where `m` is `pattern.len()`.
    pub fn contains(&self, pattern: &[C]) -> bool {
        let (lo, hi) = self.pattern_range(pattern);
        lo < hi
    }

    /// See [`pattern_range`].
    pub fn pattern_range(&self, pattern: &[C]) -> (usize, usize) {
        pattern_range(self.text, pattern, &self.table)
    }

    /// See [`pattern_positions`].
    pub fn positions(&self, pattern: &[C]) -> Vec<usize> {
        pattern_positions(self.text, pattern, &self.table).to_vec()
    }

    /// Converts the array into a suffix tree over the same text. Use
    /// [`SuffixTree::from_suffix_array`] for other label representations.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufidx::{PositionalSuffixTree, SuffixArray};
    ///
    /// let sa = SuffixArray::new(b"mississippi$");
    /// let st = sa.to_suffix_tree();
    /// assert_eq!(st.suffix_indices(), sa.table());
    /// assert_eq!(st, PositionalSuffixTree::new(b"mississippi$"));
    /// ```
    pub fn to_suffix_tree(&self) -> PositionalSuffixTree<'t, C> {
        SuffixTree::from_suffix_array(self.text, &self.table, &self.lcp)
    }
}

/// Compares the first `pattern.len()` symbols of `text[suffix..]` against `pattern`.
#[inline]
fn cmp_prefix<C: Char>(text: &[C], suffix: usize, pattern: &[C]) -> Ordering {
    text[suffix..].iter().take(pattern.len()).cmp(pattern.iter())
}

/// Half-open range of `sa` holding the suffixes of `text` that start with `pattern`.
///
/// Two binary searches over `sa`, *O*(*m* log *n*). An empty or absent pattern yields an empty
/// range.
///
/// # Example
/// ```
/// use sufidx::doubling::suffix_array;
/// use sufidx::suffix_array::pattern_range;
///
/// let text = b"panamabananas$";
/// assert_eq!(pattern_range(text, b"ana", &suffix_array(text)), (3, 6));
/// ```
pub fn pattern_range<C: Char>(text: &[C], pattern: &[C], sa: &[usize]) -> (usize, usize) {
    if pattern.is_empty() {
        return (0, 0);
    }
    let lo = sa.partition_point(|&i| cmp_prefix(text, i, pattern) == Ordering::Less);
    let hi = lo + sa[lo..].partition_point(|&i| cmp_prefix(text, i, pattern) == Ordering::Equal);
    (lo, hi)
}

/// Start offsets of the occurrences of `pattern`, in suffix array order.
pub fn pattern_positions<'a, C: Char>(text: &[C], pattern: &[C], sa: &'a [usize]) -> &'a [usize] {
    let (lo, hi) = pattern_range(text, pattern, sa);
    &sa[lo..hi]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strategy;

    #[test]
    fn contains_one_match() {
        let sa = SuffixArray::new(b"Hello, world!\0");

        assert!(sa.contains(b"world"));
    }

    #[test]
    fn contains_two_matches() {
        let data = b"The quick brown fox jumped over the lazy dog because the fox was quick\0";
        let sa = SuffixArray::new(data);

        assert!(sa.contains(b"fox"));
        assert!(sa.contains(b"quick"));
        assert_eq!(sa.positions(b"quick"), vec![65, 4]);
    }

    #[test]
    fn contains_no_matches() {
        let data = b"Now is the time for all good men to come to the aid of the party\0";
        let sa = SuffixArray::new(data);

        assert!(!sa.contains(b"times"));
        assert!(!sa.contains(b""));
    }

    #[test]
    #[should_panic]
    fn no_sentinel() {
        let _ = SuffixArray::new(b"Hello, world!");
    }

    #[test]
    fn panamabananas() {
        let sa = SuffixArray::new(b"panamabananas$");
        assert_eq!(sa.pattern_range(b"ana"), (3, 6));
        let mut positions = sa.positions(b"ana");
        positions.sort_unstable();
        assert_eq!(positions, vec![1, 7, 9]);
        assert_eq!(sa.suffix(3), b"anamabananas$");
    }

    #[test]
    fn absent_and_empty_patterns() {
        let sa = SuffixArray::new(b"panamabananas$");
        let (lo, hi) = sa.pattern_range(b"nab");
        assert_eq!(lo, hi);
        assert_eq!(sa.pattern_range(b""), (0, 0));
        let (lo, hi) = sa.pattern_range(b"zzz");
        assert_eq!((lo, hi), (sa.len(), sa.len()));
        assert!(sa.positions(b"panamabananas$$").is_empty());
    }

    #[test]
    fn pattern_longer_than_suffixes() {
        let sa = SuffixArray::new(b"ab$");
        assert_eq!(sa.pattern_range(b"b$"), (2, 3));
        assert_eq!(sa.positions(b"ab$"), vec![0]);
        assert!(!sa.contains(b"b$x"));
    }

    #[test]
    fn strategies_and_rank() {
        let text = b"mmiissiissiippii$";
        let sa = SuffixArray::new(text);
        for &strategy in [Strategy::Naive, Strategy::ManberMyers].iter() {
            assert_eq!(SuffixArray::with_strategy(text, strategy).table(), sa.table());
        }
        let rank = sa.rank();
        assert!((0..sa.len()).all(|i| rank[sa.table()[i]] == i));
    }

    #[test]
    fn empty_text() {
        let sa = SuffixArray::<u8>::new(&[]);
        assert!(sa.is_empty());
        assert!(sa.lcp().is_empty());
        assert_eq!(sa.to_suffix_tree().node_count(), 1);

        let sa = SuffixArray::new(b"$");
        assert_eq!(sa.table(), &[0]);
        assert!(sa.lcp().is_empty());
    }

    use proptest::collection::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]
        #[test]
        fn range_matches_scan(mut s in vec(1u8..4, 0..150), q in vec(1u8..4, 1..5)) {
            s.push(0u8);
            let sa = SuffixArray::new(&s);
            let mut found = sa.positions(&q);
            found.sort_unstable();
            let expected: Vec<usize> = (0..s.len()).filter(|&i| s[i..].starts_with(&q)).collect();
            prop_assert_eq!(found, expected);
        }
    }
}
