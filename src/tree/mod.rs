//! Compressed suffix tries over a borrowed, terminated text.
//!
//! Nodes live in one arena and refer to each other by [`NodeId`]. The root is always
//! [`NodeId::ROOT`]. Every other node owns the label of the edge leading into it, stored either as
//! a [`Span`] into the text ([`PositionalSuffixTree`]) or as a [`Literal`] copy of the symbols
//! ([`LiteralSuffixTree`]). Both representations answer every query identically.
//!
//! Trees are built with [`SuffixTree::new`] (one suffix at a time, see [`naive`]) or from a suffix
//! array and its LCP array with [`SuffixTree::from_suffix_array`] (see [`convert`]).
use crate::children::Children;
use crate::{common_prefix, write_symbols, Char};
use std::fmt;

pub mod convert;
pub mod naive;

/// Suffix tree whose edges refer into the text.
pub type PositionalSuffixTree<'t, C> = SuffixTree<'t, C, Span>;

/// Suffix tree whose edges hold a copy of their symbols.
pub type LiteralSuffixTree<'t, C> = SuffixTree<'t, C, Literal<C>>;

/// Index of a node in a tree arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The label of an edge.
pub trait Label<C>: Sized {
    /// Label for `text[start..start + len]`.
    fn from_text(text: &[C], start: usize, len: usize) -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The symbols of the label. `text` must be the text the label was made from.
    fn symbols<'a>(&'a self, text: &'a [C]) -> &'a [C];

    /// Keeps the first `at` symbols and returns a label for the rest.
    fn split_off(&mut self, at: usize) -> Self;
}

/// A `(start, len)` reference into the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl<C> Label<C> for Span {
    #[inline]
    fn from_text(_: &[C], start: usize, len: usize) -> Self {
        Span { start, len }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn symbols<'a>(&'a self, text: &'a [C]) -> &'a [C] {
        &text[self.start..self.start + self.len]
    }

    fn split_off(&mut self, at: usize) -> Self {
        assert!(at <= self.len, "split point is inside the label");
        let tail = Span {
            start: self.start + at,
            len: self.len - at,
        };
        self.len = at;
        tail
    }
}

/// An owned copy of the symbols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal<C>(Vec<C>);

impl<C: Copy> Label<C> for Literal<C> {
    fn from_text(text: &[C], start: usize, len: usize) -> Self {
        Literal(text[start..start + len].to_vec())
    }

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn symbols<'a>(&'a self, _: &'a [C]) -> &'a [C] {
        &self.0
    }

    fn split_off(&mut self, at: usize) -> Self {
        Literal(self.0.split_off(at))
    }
}

#[derive(Clone, Debug)]
struct Node<C, L> {
    parent: Option<NodeId>,
    label: L,
    /// Length of the path from the root, this node's label included.
    depth: usize,
    /// Start of the suffix spelled by the path to this leaf.
    suffix: Option<usize>,
    children: Children<C>,
}

/// Where a walk from the root stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Locus {
    /// The node reached, or the node below the edge the walk stopped in.
    pub node: NodeId,
    /// `None` if the walk ended exactly at `node`, otherwise the number of symbols consumed from
    /// the edge leading into `node`.
    pub offset: Option<usize>,
}

/// A suffix tree over `text`, which must be terminated by a sentinel.
#[derive(Clone)]
pub struct SuffixTree<'t, C, L = Span> {
    text: &'t [C],
    nodes: Vec<Node<C, L>>,
}

impl<'t, C: Char, L: Label<C>> SuffixTree<'t, C, L> {
    fn with_root(text: &'t [C]) -> Self {
        let root = Node {
            parent: None,
            label: L::from_text(text, 0, 0),
            depth: 0,
            suffix: None,
            children: Children::new(),
        };
        let mut nodes = Vec::with_capacity(2 * text.len() + 1);
        nodes.push(root);
        Self { text, nodes }
    }

    /// Hangs a leaf for `text[start..]` below `parent` and records `suffix` on it.
    fn add_leaf(&mut self, parent: NodeId, start: usize, suffix: usize) -> NodeId {
        let len = self.text.len() - start;
        let leaf = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            label: L::from_text(self.text, start, len),
            depth: self.nodes[parent.0].depth + len,
            suffix: Some(suffix),
            children: Children::new(),
        });
        self.nodes[parent.0]
            .children
            .insert(self.text[start], leaf);
        leaf
    }

    /// Splits the edge from `parent` into `child` after `at` symbols and returns the new node.
    fn split_edge(&mut self, parent: NodeId, child: NodeId, at: usize) -> NodeId {
        debug_assert_eq!(self.nodes[child.0].parent, Some(parent));
        debug_assert!(0 < at && at < self.nodes[child.0].label.len());

        let text = self.text;
        let tail = self.nodes[child.0].label.split_off(at);
        let head = std::mem::replace(&mut self.nodes[child.0].label, tail);
        let head_key = head.symbols(text)[0];
        let tail_key = self.nodes[child.0].label.symbols(text)[0];

        let mid = NodeId(self.nodes.len());
        let mut children = Children::new();
        children.insert(tail_key, child);
        self.nodes.push(Node {
            parent: Some(parent),
            label: head,
            depth: self.nodes[parent.0].depth + at,
            suffix: None,
            children,
        });
        self.nodes[child.0].parent = Some(mid);
        self.nodes[parent.0].children.insert(head_key, mid);
        mid
    }

    /// The indexed text, sentinel included.
    #[inline]
    pub fn text(&self) -> &'t [C] {
        self.text
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Children of `node`, in ascending order of their first symbol.
    pub fn children(&self, node: NodeId) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.nodes[node.0].children.iter().map(|(_, child)| child)
    }

    /// The child of `node` whose label starts with `c`.
    #[inline]
    pub fn child(&self, node: NodeId, c: C) -> Option<NodeId> {
        self.nodes[node.0].children.get(c)
    }

    /// Label of the edge leading into `node`; empty for the root.
    #[inline]
    pub fn label(&self, node: NodeId) -> &[C] {
        self.nodes[node.0].label.symbols(self.text)
    }

    /// Number of symbols on the path from the root to `node`.
    #[inline]
    pub fn depth(&self, node: NodeId) -> usize {
        self.nodes[node.0].depth
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.nodes[node.0].children.is_empty()
    }

    /// Start of the suffix ending at the leaf `node`.
    #[inline]
    pub fn suffix(&self, node: NodeId) -> Option<usize> {
        self.nodes[node.0].suffix
    }

    /// Concatenation of the labels from the root to `node`.
    pub fn path_label(&self, node: NodeId) -> Vec<C> {
        let mut path = Vec::with_capacity(self.depth(node));
        let mut cur = Some(node);
        while let Some(n) = cur {
            path.extend(self.label(n).iter().rev());
            cur = self.parent(n);
        }
        path.reverse();
        path
    }

    /// Leaves below `node` in lexicographic order of their path labels.
    pub fn leaves(&self, node: NodeId) -> Leaves<'_, 't, C, L> {
        Leaves {
            tree: self,
            stack: vec![node],
        }
    }

    /// Start offsets of all suffixes in lexicographic order. This equals the suffix array.
    pub fn suffix_indices(&self) -> Vec<usize> {
        self.leaves(self.root())
            .filter_map(|leaf| self.suffix(leaf))
            .collect()
    }

    /// Walks from the root along `query`.
    ///
    /// Returns `None` as soon as the next symbol of `query` has no continuation in the tree.
    pub fn follow_path(&self, query: &[C]) -> Option<Locus> {
        let mut node = self.root();
        let mut rest = query;
        while let Some(&c) = rest.first() {
            let child = self.child(node, c)?;
            let label = self.label(child);
            let k = common_prefix(label, rest);
            if k < label.len() {
                return if k == rest.len() {
                    Some(Locus {
                        node: child,
                        offset: Some(k),
                    })
                } else {
                    None
                };
            }
            rest = &rest[k..];
            node = child;
        }
        Some(Locus { node, offset: None })
    }

    /// `true` if `query` occurs in the text. The empty query always does.
    ///
    /// # Example
    /// ```
    /// use sufidx::PositionalSuffixTree;
    ///
    /// let st = PositionalSuffixTree::new(b"ataaatg$");
    /// assert!(st.has_substring(b"aaatg"));
    /// assert!(!st.has_substring(b"aaaa"));
    /// ```
    pub fn has_substring(&self, query: &[C]) -> bool {
        self.follow_path(query).is_some()
    }

    /// `true` if `query` is a suffix of the text without its sentinel.
    ///
    /// The empty query is a suffix; a query containing the sentinel never is.
    ///
    /// # Example
    /// ```
    /// use sufidx::PositionalSuffixTree;
    ///
    /// let st = PositionalSuffixTree::new(b"ataaatg$");
    /// assert!(st.has_suffix(b"ataaatg"));
    /// assert!(st.has_suffix(b"atg"));
    /// assert!(!st.has_suffix(b"aaat"));
    /// assert!(!st.has_suffix(b"$"));
    /// ```
    pub fn has_suffix(&self, query: &[C]) -> bool {
        let sentinel = match self.text.last() {
            Some(&s) => s,
            None => return query.is_empty(),
        };
        match self.follow_path(query) {
            None => false,
            Some(Locus { node, offset: None }) => self.child(node, sentinel).is_some(),
            Some(Locus {
                node,
                offset: Some(k),
            }) => self.label(node)[k] == sentinel,
        }
    }

    /// Start of some occurrence of `query`, or `None` if it does not occur.
    pub fn find_substring(&self, query: &[C]) -> Option<usize> {
        let locus = self.follow_path(query)?;
        self.leaves(locus.node).find_map(|leaf| self.suffix(leaf))
    }

    /// Starts of all occurrences of `query`, in lexicographic order of the suffixes.
    pub fn positions(&self, query: &[C]) -> Vec<usize> {
        match self.follow_path(query) {
            None => Vec::new(),
            Some(locus) => self
                .leaves(locus.node)
                .filter_map(|leaf| self.suffix(leaf))
                .collect(),
        }
    }
}

/// Preorder walk over the leaves below a node.
pub struct Leaves<'a, 't, C, L> {
    tree: &'a SuffixTree<'t, C, L>,
    stack: Vec<NodeId>,
}

impl<'a, 't, C: Char, L: Label<C>> Iterator for Leaves<'a, 't, C, L> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(node) = self.stack.pop() {
            if self.tree.is_leaf(node) {
                return Some(node);
            }
            self.stack.extend(self.tree.children(node).rev());
        }
        None
    }
}

/// Trees are equal when they have the same shape, labels and leaf suffixes, whatever their label
/// representation.
impl<'t, 'u, C, L, M> PartialEq<SuffixTree<'u, C, M>> for SuffixTree<'t, C, L>
where
    C: Char,
    L: Label<C>,
    M: Label<C>,
{
    fn eq(&self, other: &SuffixTree<'u, C, M>) -> bool {
        let mut stack = vec![(self.root(), other.root())];
        while let Some((a, b)) = stack.pop() {
            if self.label(a) != other.label(b)
                || self.suffix(a) != other.suffix(b)
                || self.nodes[a.0].children.len() != other.nodes[b.0].children.len()
            {
                return false;
            }
            stack.extend(self.children(a).zip(other.children(b)));
        }
        true
    }
}

impl<'t, C: Char, L: Label<C>> fmt::Debug for SuffixTree<'t, C, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "SuffixTree")?;
        let mut stack = vec![(self.root(), 0)];
        while let Some((node, indent)) = stack.pop() {
            write!(f, "{:1$}", "", indent * 2)?;
            if node == self.root() {
                writeln!(f, "(root)")?;
            } else {
                write_symbols(f, self.label(node).iter().copied().map(Some))?;
                match self.suffix(node) {
                    Some(suffix) => writeln!(f, " (leaf {})", suffix)?,
                    None => writeln!(f, " (depth {})", self.depth(node))?,
                }
            }
            stack.extend(self.children(node).rev().map(|child| (child, indent + 1)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_split() {
        let mut span = Span { start: 2, len: 5 };
        let tail = <Span as Label<u8>>::split_off(&mut span, 2);
        assert_eq!(span, Span { start: 2, len: 2 });
        assert_eq!(tail, Span { start: 4, len: 3 });
        assert_eq!(tail.symbols(b"banana$"), b"na$");
    }

    #[test]
    fn literal_split() {
        let mut literal = Literal::from_text(b"banana$", 2, 5);
        let tail = literal.split_off(2);
        assert_eq!(literal.symbols(&[]), b"na");
        assert_eq!(tail.symbols(&[]), b"na$");
    }

    #[test]
    fn empty_text_has_bare_root() {
        let st = PositionalSuffixTree::<u8>::new(&[]);
        assert_eq!(st.node_count(), 1);
        assert!(st.has_substring(b""));
        assert!(!st.has_substring(b"a"));
        assert!(st.has_suffix(b""));
        assert!(!st.has_suffix(b"a"));
        assert_eq!(st.find_substring(b""), None);
        assert!(st.suffix_indices().is_empty());
    }

    #[test]
    fn follow_path_loci() {
        // (root)
        //   $
        //   a
        //     $
        //     na
        //       $
        //       na$
        //   banana$
        //   na
        //     $
        //     na$
        let st = PositionalSuffixTree::new(b"banana$");

        let a = st.child(st.root(), b'a').unwrap();
        let ana = st.child(a, b'n').unwrap();
        assert_eq!(st.label(ana), b"na");
        assert_eq!(st.depth(ana), 3);

        assert_eq!(
            st.follow_path(b"ana"),
            Some(Locus {
                node: ana,
                offset: None
            })
        );
        assert_eq!(
            st.follow_path(b"an"),
            Some(Locus {
                node: ana,
                offset: Some(1)
            })
        );
        assert_eq!(
            st.follow_path(b""),
            Some(Locus {
                node: st.root(),
                offset: None
            })
        );
        assert_eq!(st.follow_path(b"anb"), None);
        assert_eq!(st.follow_path(b"banana$$"), None);
        assert_eq!(st.path_label(ana), b"ana");
    }

    #[test]
    fn substring_and_suffix_queries() {
        let st = PositionalSuffixTree::new(b"ataaatg$");
        assert!(st.has_substring(b"aaatg"));
        assert!(st.has_substring(b""));
        assert!(st.has_substring(b"$"));
        assert!(st.has_substring(b"g$"));
        assert!(!st.has_substring(b"gg"));

        assert!(st.has_suffix(b"ataaatg"));
        assert!(st.has_suffix(b"aaatg"));
        assert!(st.has_suffix(b"g"));
        assert!(st.has_suffix(b""));
        assert!(!st.has_suffix(b"aaat"));
        assert!(!st.has_suffix(b"at"));
        assert!(!st.has_suffix(b"$"));
        assert!(!st.has_suffix(b"g$"));
    }

    #[test]
    fn occurrences() {
        let st = PositionalSuffixTree::new(b"panamabananas$");
        assert_eq!(st.positions(b"ana"), vec![1, 7, 9]);
        assert!(st.positions(b"ana").contains(&st.find_substring(b"ana").unwrap()));
        assert_eq!(st.find_substring(b"mab"), Some(4));
        assert_eq!(st.find_substring(b"nab"), None);
        assert!(st.positions(b"x").is_empty());
    }

    #[test]
    fn queries_are_repeatable() {
        let st = LiteralSuffixTree::new(b"mississippi$");
        for _ in 0..3 {
            assert_eq!(st.find_substring(b"ssi"), Some(5));
            assert!(st.has_substring(b"issip"));
            assert!(st.follow_path(b"sis").is_some());
        }
    }

    #[test]
    fn debug_print_materializes_labels() {
        let st = LiteralSuffixTree::new(b"aa$");
        let printed = format!("{:?}", st);
        assert_eq!(
            printed,
            "SuffixTree\n(root)\n  $ (leaf 2)\n  a (depth 1)\n    $ (leaf 1)\n    a$ (leaf 0)\n"
        );
    }
}
