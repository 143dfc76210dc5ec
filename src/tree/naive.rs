//! Building a suffix tree by inserting the suffixes of the text one by one, *O*(*n*²).
use super::{Label, NodeId, SuffixTree};
use crate::{common_prefix, is_terminated, Char};
use contracts::*;
use log::debug;

impl<'t, C: Char, L: Label<C>> SuffixTree<'t, C, L> {
    /// Builds the suffix tree of `text` by inserting every suffix, longest first.
    ///
    /// `text` must end with a sentinel, including the empty text's lone sentinel.
    ///
    /// # Example
    /// ```
    /// use sufidx::{LiteralSuffixTree, PositionalSuffixTree};
    ///
    /// let positional = PositionalSuffixTree::new(b"banana$");
    /// let literal = LiteralSuffixTree::new(b"banana$");
    /// assert_eq!(positional, literal);
    /// assert_eq!(positional.suffix_indices(), vec![6, 5, 3, 1, 0, 4, 2]);
    /// ```
    #[requires(is_terminated(text), "last character is unique and minimum")]
    pub fn new(text: &'t [C]) -> Self {
        let mut tree = Self::with_root(text);
        for offset in 0..text.len() {
            tree.insert_suffix(offset);
        }
        debug!(
            "inserted {} suffixes into a tree of {} nodes",
            text.len(),
            tree.node_count()
        );
        tree
    }

    /// Inserts `text[offset..]` and returns the leaf that spells it.
    ///
    /// The walk follows the edge starting with the next unmatched symbol for as long as its whole
    /// label matches. At the first mismatch inside a label the edge is split and the new leaf hangs
    /// off the split node; if no edge starts with the next symbol the leaf hangs off the current
    /// node. Inserting a suffix that is already present returns its node unchanged.
    pub fn insert_suffix(&mut self, offset: usize) -> NodeId {
        let text = self.text;
        let mut node = self.root();
        let mut pos = offset;
        loop {
            let c = match text.get(pos) {
                Some(&c) => c,
                None => return node,
            };
            let child = match self.child(node, c) {
                Some(child) => child,
                None => return self.add_leaf(node, pos, offset),
            };

            let k = common_prefix(self.label(child), &text[pos..]);
            if k == self.label(child).len() {
                node = child;
                pos += k;
            } else {
                let mid = self.split_edge(node, child, k);
                return self.add_leaf(mid, pos + k, offset);
            }
        }
    }
}
