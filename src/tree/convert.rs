//! Building a suffix tree from a suffix array and its LCP array, *O*(*n*).
//!
//! Suffixes are attached in suffix-array order. A stack holds the path from the root to the leaf
//! attached last; since the next suffix shares exactly `lcp[i - 1]` symbols with that leaf, its
//! branching point lies on this path.
use super::{Label, SuffixTree};
use crate::{is_terminated, Char};
use contracts::*;
use log::debug;

impl<'t, C: Char, L: Label<C>> SuffixTree<'t, C, L> {
    /// Converts the suffix array `sa` of `text` and its LCP array `lcp` into a suffix tree.
    ///
    /// For every suffix after the first, the stack is popped down to the deepest node whose depth
    /// does not exceed the LCP with the previous suffix. If that node's depth equals the LCP the
    /// new leaf hangs directly off it; otherwise the edge towards the last popped node is split at
    /// the LCP depth and the leaf hangs off the new node.
    ///
    /// # Example
    /// ```
    /// use sufidx::PositionalSuffixTree;
    ///
    /// let text = b"banana$";
    /// let st = PositionalSuffixTree::from_suffix_array(text, &[6, 5, 3, 1, 0, 4, 2], &[0, 1, 3, 0, 0, 2]);
    /// assert_eq!(st, PositionalSuffixTree::new(text));
    /// ```
    #[requires(is_terminated(text), "last character is unique and minimum")]
    #[requires(text.len() == sa.len(), "`text` and `sa` have same length")]
    #[requires(lcp.len() == sa.len().saturating_sub(1), "`lcp` has one entry per adjacent pair")]
    pub fn from_suffix_array(text: &'t [C], sa: &[usize], lcp: &[usize]) -> Self {
        let mut tree = Self::with_root(text);
        let mut stack = vec![tree.root()];

        for (i, &suffix) in sa.iter().enumerate() {
            let bound = if i == 0 { 0 } else { lcp[i - 1] };

            let mut popped = None;
            while let Some(&top) = stack.last() {
                if tree.depth(top) <= bound {
                    break;
                }
                popped = stack.pop();
            }
            let top = match stack.last() {
                Some(&top) => top,
                None => unreachable!("the root has depth 0"),
            };

            let parent = match popped {
                Some(child) if tree.depth(top) < bound => {
                    let mid = tree.split_edge(top, child, bound - tree.depth(top));
                    stack.push(mid);
                    mid
                }
                _ => top,
            };

            let leaf = tree.add_leaf(parent, suffix + bound, suffix);
            stack.push(leaf);
        }

        debug!(
            "converted suffix array of {} suffixes into a tree of {} nodes",
            sa.len(),
            tree.node_count()
        );
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::super::{LiteralSuffixTree, PositionalSuffixTree};
    use crate::doubling::suffix_array;
    use crate::lcp::kasai;

    fn convert(text: &[u8]) -> PositionalSuffixTree<'_, u8> {
        let sa = suffix_array(text);
        let lcp = kasai(text, &sa);
        PositionalSuffixTree::from_suffix_array(text, &sa, &lcp)
    }

    #[test]
    fn banana() {
        let st = convert(b"banana$");
        let na = st.child(st.root(), b'n').unwrap();
        assert_eq!(st.label(na), b"na");
        assert_eq!(st.children(na).count(), 2);
        assert_eq!(st.node_count(), 11);
        assert_eq!(st, PositionalSuffixTree::new(b"banana$"));
    }

    #[test]
    fn sentinel_only() {
        let st = convert(b"$");
        assert_eq!(st.node_count(), 2);
        assert_eq!(st.suffix_indices(), vec![0]);
    }

    #[test]
    fn empty_text() {
        let st = convert(b"");
        assert_eq!(st.node_count(), 1);
    }

    #[test]
    fn unary_text_is_a_caterpillar() {
        let st = convert(b"AAAA$");
        let mut node = st.root();
        for depth in 1..=3 {
            node = st.child(node, b'A').unwrap();
            assert_eq!(st.depth(node), depth);
            assert!(st.child(node, b'$').is_some());
        }
        assert_eq!(st.suffix_indices(), vec![4, 3, 2, 1, 0]);
    }

    use proptest::collection::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]
        #[test]
        fn round_trip(mut s in vec(1u8..4, 0..150)) {
            s.push(0u8);
            let sa = suffix_array(&s);
            let lcp = kasai(&s, &sa);
            let st = LiteralSuffixTree::from_suffix_array(&s, &sa, &lcp);

            let mut seen = vec![false; s.len()];
            for leaf in st.leaves(st.root()) {
                let suffix = st.suffix(leaf).unwrap();
                prop_assert!(!seen[suffix]);
                seen[suffix] = true;
                prop_assert_eq!(st.path_label(leaf), s[suffix..].to_vec());
            }
            prop_assert!(seen.iter().all(|&s| s));
            prop_assert_eq!(st.suffix_indices(), sa);
            prop_assert!(st == PositionalSuffixTree::new(&s));
        }
    }
}
