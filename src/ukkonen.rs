//! Online suffix tree construction with Ukkonen's algorithm, *O*(*n*).
//!
//! The text is scanned once from left to right. Phase `i` makes every suffix of `text[..=i]`
//! present in the tree:
//!
//! - Leaf edges do not store their end. They all read the shared `cursor`, so advancing it at the
//!   start of a phase extends every leaf at once.
//! - The active point marks the longest suffix that is already present but not yet a leaf. From
//!   there, extensions either find the new symbol already present, which ends the phase, or
//!   branch: a new leaf is attached at a node or after splitting an edge.
//! - An internal node created by one extension gets its suffix link from the next one, which lets
//!   the active point jump to the next shorter suffix without walking down from the root.
//!
//! The sentinel is implicit: position `text.len()` reads as `None`, which sorts before every
//! symbol.
use crate::children::Children;
use crate::config::Config;
use crate::tree::{Locus, NodeId};
use crate::{write_symbols, Char};
use log::{debug, trace};
use std::borrow::Cow;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum End {
    /// Grows with the shared cursor.
    Open,
    Fixed(usize),
}

#[derive(Clone, Debug)]
struct Node<C> {
    /// Label of the incoming edge is `text[start..end]`.
    start: usize,
    end: End,
    link: Option<NodeId>,
    children: Children<Option<C>>,
}

/// `text[first..last]` read downwards from `origin`. Explicit when it is empty, i.e. when it
/// denotes `origin` itself.
#[derive(Clone, Copy, Debug)]
struct ActivePoint {
    origin: NodeId,
    first: usize,
    last: usize,
}

impl ActivePoint {
    #[inline]
    fn is_explicit(&self) -> bool {
        self.first >= self.last
    }
}

/// Suffix tree of a text built online, with an implicit sentinel.
///
/// # Example
/// ```
/// use sufidx::{Config, UkkonenTree};
///
/// let st = UkkonenTree::new(b"ataaatg");
/// assert!(st.has_substring(b"aaatg"));
/// assert!(st.has_suffix(b"ataaatg"));
/// assert!(!st.has_suffix(b"aaat"));
/// assert_eq!(st.find_substring(b"aat"), Some(3));
///
/// let st = UkkonenTree::with_config(b"BaNaNa", Config::new().case_insensitive(true));
/// assert!(st.has_substring(b"NAN"));
/// ```
#[derive(Clone)]
pub struct UkkonenTree<C> {
    text: Vec<C>,
    nodes: Vec<Node<C>>,
    /// End of every open leaf edge.
    cursor: usize,
    config: Config,
}

impl<C: Char> UkkonenTree<C> {
    /// Builds the suffix tree of `text` with the default [`Config`].
    pub fn new(text: &[C]) -> Self {
        Self::with_config(text, Config::default())
    }

    pub fn with_config(text: &[C], config: Config) -> Self {
        let text = if config.case_insensitive {
            text.iter().map(|c| c.fold_case()).collect()
        } else {
            text.to_vec()
        };

        let root = Node {
            start: 0,
            end: End::Fixed(0),
            link: None,
            children: Children::new(),
        };
        let mut nodes = Vec::with_capacity(2 * text.len() + 2);
        nodes.push(root);

        let mut tree = Self {
            text,
            nodes,
            cursor: 0,
            config,
        };

        let mut active = ActivePoint {
            origin: NodeId::ROOT,
            first: 0,
            last: 0,
        };
        for i in 0..=tree.text.len() {
            tree.phase(&mut active, i);
        }

        debug!(
            "built suffix tree of {} symbols with {} nodes",
            tree.text.len(),
            tree.nodes.len()
        );
        tree
    }

    #[inline]
    fn symbol(&self, i: usize) -> Option<C> {
        self.text.get(i).copied()
    }

    #[inline]
    fn edge_end(&self, node: NodeId) -> usize {
        match self.nodes[node.0].end {
            End::Open => self.cursor,
            End::Fixed(end) => end,
        }
    }

    #[inline]
    fn edge_len(&self, node: NodeId) -> usize {
        self.edge_end(node) - self.nodes[node.0].start
    }

    /// The edge the non-explicit `active` point lies on.
    fn active_edge(&self, active: &ActivePoint) -> NodeId {
        match self.nodes[active.origin.0]
            .children
            .get(self.symbol(active.first))
        {
            Some(child) => child,
            None => unreachable!("active point lies on an existing edge"),
        }
    }

    fn add_leaf(&mut self, parent: NodeId, start: usize) -> NodeId {
        let leaf = NodeId(self.nodes.len());
        self.nodes.push(Node {
            start,
            end: End::Open,
            link: None,
            children: Children::new(),
        });
        let key = self.symbol(start);
        self.nodes[parent.0].children.insert(key, leaf);
        leaf
    }

    /// Splits the edge from `parent` into `child` after `span` symbols and returns the new node.
    /// The new node's edge is closed at the split point whatever `child`'s end is.
    fn split_edge(&mut self, parent: NodeId, child: NodeId, span: usize) -> NodeId {
        let start = self.nodes[child.0].start;
        let mid = NodeId(self.nodes.len());
        let mut children = Children::new();
        children.insert(self.symbol(start + span), child);
        self.nodes.push(Node {
            start,
            end: End::Fixed(start + span),
            link: None,
            children,
        });
        self.nodes[child.0].start = start + span;
        let key = self.symbol(start);
        self.nodes[parent.0].children.insert(key, mid);
        mid
    }

    /// Walks the active point down while it covers whole edges.
    fn canonize(&self, active: &mut ActivePoint) {
        while !active.is_explicit() {
            let child = self.active_edge(active);
            let len = self.edge_len(child);
            if len > active.last - active.first {
                break;
            }
            active.first += len;
            active.origin = child;
        }
    }

    /// Adds the symbol at `i` to every suffix in the tree.
    fn phase(&mut self, active: &mut ActivePoint, i: usize) {
        let c = self.symbol(i);
        self.cursor = i + 1;

        let mut last_parent: Option<NodeId> = None;
        let mut extensions = 0;
        let parent = loop {
            let mut parent = active.origin;
            if active.is_explicit() {
                if self.nodes[parent.0].children.get(c).is_some() {
                    break parent;
                }
            } else {
                let child = self.active_edge(active);
                let span = active.last - active.first;
                if self.symbol(self.nodes[child.0].start + span) == c {
                    break parent;
                }
                parent = self.split_edge(active.origin, child, span);
            }

            self.add_leaf(parent, i);
            extensions += 1;

            if let Some(prev) = last_parent.filter(|&prev| prev != NodeId::ROOT) {
                self.nodes[prev.0].link = Some(parent);
            }
            last_parent = Some(parent);

            if active.origin == NodeId::ROOT {
                active.first += 1;
            } else {
                let link = self.nodes[active.origin.0].link;
                debug_assert!(link.is_some(), "internal node without suffix link");
                active.origin = link.unwrap_or(NodeId::ROOT);
            }
            self.canonize(active);
        };

        if let Some(prev) = last_parent.filter(|&prev| prev != NodeId::ROOT) {
            self.nodes[prev.0].link = Some(parent);
        }

        active.last += 1;
        self.canonize(active);

        trace!(
            "phase {}: {} extensions, active point {:?}",
            i,
            extensions,
            active
        );
    }

    fn fold<'q>(&self, query: &'q [C]) -> Cow<'q, [C]> {
        if self.config.case_insensitive {
            Cow::Owned(query.iter().map(|c| c.fold_case()).collect())
        } else {
            Cow::Borrowed(query)
        }
    }

    /// The indexed text, case-folded if so configured and without the sentinel.
    #[inline]
    pub fn text(&self) -> &[C] {
        &self.text
    }

    /// Length of the text without the sentinel.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn config(&self) -> Config {
        self.config
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
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.nodes[node.0].children.is_empty()
    }

    /// Children of `node`, the sentinel edge first, then in ascending order of their first symbol.
    pub fn children(&self, node: NodeId) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.nodes[node.0].children.iter().map(|(_, child)| child)
    }

    /// The child of `node` whose label starts with `c`, `None` standing for the sentinel.
    #[inline]
    pub fn child(&self, node: NodeId, c: Option<C>) -> Option<NodeId> {
        self.nodes[node.0].children.get(c)
    }

    /// Label of the edge leading into `node`; `None` is the sentinel.
    pub fn label(&self, node: NodeId) -> impl Iterator<Item = Option<C>> + '_ {
        (self.nodes[node.0].start..self.edge_end(node)).map(move |i| self.symbol(i))
    }

    /// Node spelling the path of `node` without its first symbol.
    #[inline]
    pub fn suffix_link(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].link
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.children.is_empty())
            .count()
    }

    /// Leaves below `node` in lexicographic order, with the start of the suffix each one spells.
    /// `depth` is the path length down to the top of `node`'s incoming edge.
    fn leaves(&self, node: NodeId, depth: usize) -> Leaves<'_, C> {
        Leaves {
            tree: self,
            stack: vec![(node, depth)],
        }
    }

    /// Start offsets of all suffixes, the empty one included, in lexicographic order. This equals
    /// the suffix array of the text with a sentinel appended.
    pub fn suffix_indices(&self) -> Vec<usize> {
        self.leaves(self.root(), 0).map(|(_, suffix)| suffix).collect()
    }

    /// Walks from the root along `query`, which must already be case-folded.
    fn walk(&self, query: &[C]) -> Option<Locus> {
        let mut node = self.root();
        let mut rest = query;
        while let Some(&c) = rest.first() {
            let child = self.child(node, Some(c))?;
            let start = self.nodes[child.0].start;
            let len = self.edge_len(child);
            let k = rest
                .iter()
                .take(len)
                .enumerate()
                .take_while(|&(j, &q)| self.symbol(start + j) == Some(q))
                .count();
            if k < len {
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

    /// Walks from the root along `query`. See [`SuffixTree::follow_path`](crate::SuffixTree::follow_path).
    pub fn follow_path(&self, query: &[C]) -> Option<Locus> {
        self.walk(&self.fold(query))
    }

    /// `true` if `query` occurs in the text. The empty query always does.
    pub fn has_substring(&self, query: &[C]) -> bool {
        self.follow_path(query).is_some()
    }

    /// `true` if `query` is a suffix of the text. The empty query is one.
    pub fn has_suffix(&self, query: &[C]) -> bool {
        match self.follow_path(query) {
            None => false,
            Some(Locus { node, offset: None }) => self.child(node, None).is_some(),
            Some(Locus {
                node,
                offset: Some(k),
            }) => self.symbol(self.nodes[node.0].start + k).is_none(),
        }
    }

    /// Leaves below the place where `query` ends.
    fn occurrences(&self, query: &[C]) -> Option<Leaves<'_, C>> {
        let query = self.fold(query);
        let locus = self.walk(&query)?;
        let above = match locus.offset {
            Some(k) => query.len() - k,
            None => query.len() - self.edge_len(locus.node),
        };
        Some(self.leaves(locus.node, above))
    }

    /// Start of some occurrence of `query`, or `None` if it does not occur.
    pub fn find_substring(&self, query: &[C]) -> Option<usize> {
        self.occurrences(query)?.next().map(|(_, suffix)| suffix)
    }

    /// Starts of all occurrences of `query`, in lexicographic order of the suffixes.
    pub fn positions(&self, query: &[C]) -> Vec<usize> {
        match self.occurrences(query) {
            None => Vec::new(),
            Some(leaves) => leaves.map(|(_, suffix)| suffix).collect(),
        }
    }
}

/// Preorder walk over leaves, tracking the path length above each edge.
struct Leaves<'a, C> {
    tree: &'a UkkonenTree<C>,
    stack: Vec<(NodeId, usize)>,
}

impl<'a, C: Char> Iterator for Leaves<'a, C> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<(NodeId, usize)> {
        while let Some((node, above)) = self.stack.pop() {
            let tree = self.tree;
            if tree.is_leaf(node) {
                return Some((node, tree.nodes[node.0].start - above));
            }
            let depth = above + tree.edge_len(node);
            self.stack
                .extend(tree.children(node).rev().map(|child| (child, depth)));
        }
        None
    }
}

impl<C: Char> fmt::Debug for UkkonenTree<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "UkkonenTree")?;
        let mut stack = vec![(self.root(), 0)];
        while let Some((node, indent)) = stack.pop() {
            write!(f, "{:1$}", "", indent * 2)?;
            if node == self.root() {
                writeln!(f, "(root)")?;
            } else {
                write_symbols(f, self.label(node))?;
                match self.suffix_link(node) {
                    Some(link) => writeln!(f, " (link {})", link.index())?,
                    None => writeln!(f)?,
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
    use crate::doubling::suffix_array;
    use crate::tree::PositionalSuffixTree;

    fn labels(st: &UkkonenTree<u8>, node: NodeId) -> Vec<Vec<Option<u8>>> {
        st.children(node)
            .map(|child| st.label(child).collect())
            .collect()
    }

    fn path(st: &UkkonenTree<u8>, target: NodeId) -> Option<Vec<Option<u8>>> {
        let mut stack = vec![(st.root(), Vec::new())];
        while let Some((node, prefix)) = stack.pop() {
            if node == target {
                return Some(prefix);
            }
            for child in st.children(node) {
                let mut p = prefix.clone();
                p.extend(st.label(child));
                stack.push((child, p));
            }
        }
        None
    }

    #[test]
    fn abc_root_edges() {
        let st = UkkonenTree::new(b"abc");
        assert_eq!(
            labels(&st, st.root()),
            vec![
                vec![None],
                vec![Some(b'a'), Some(b'b'), Some(b'c'), None],
                vec![Some(b'b'), Some(b'c'), None],
                vec![Some(b'c'), None],
            ]
        );
        assert_eq!(st.node_count(), 5);
        assert_eq!(st.leaf_count(), 4);
    }

    #[test]
    fn empty_text() {
        let st = UkkonenTree::<u8>::new(&[]);
        assert!(st.is_empty());
        assert_eq!(labels(&st, st.root()), vec![vec![None]]);
        assert!(st.has_substring(b""));
        assert!(st.has_suffix(b""));
        assert!(!st.has_substring(b"a"));
        assert_eq!(st.suffix_indices(), vec![0]);
    }

    #[test]
    fn banana() {
        let st = UkkonenTree::new(b"banana");
        assert_eq!(st.suffix_indices(), vec![6, 5, 3, 1, 0, 4, 2]);
        assert_eq!(st.positions(b"ana"), vec![3, 1]);
        assert_eq!(st.positions(b"an"), vec![3, 1]);
        assert_eq!(st.find_substring(b"b"), Some(0));
        assert_eq!(st.find_substring(b"nab"), None);
        assert!(st.has_suffix(b"nana"));
        assert!(!st.has_suffix(b"nan"));
        assert_eq!(st.node_count(), 11);
    }

    #[test]
    fn ataaatg() {
        let st = UkkonenTree::new(b"ataaatg");
        assert!(st.has_substring(b"aaatg"));
        assert!(st.has_suffix(b"aaatg"));
        assert!(st.has_suffix(b"ataaatg"));
        assert!(!st.has_suffix(b"ataaat"));
        assert!(!st.has_substring(b"gg"));
        assert_eq!(st.find_substring(b"taa"), Some(1));
    }

    #[test]
    fn case_insensitive() {
        let config = Config::new().case_insensitive(true);
        let st = UkkonenTree::with_config(b"MiSSissIPPI", config);
        assert_eq!(st.text(), b"mississippi");
        assert!(st.has_substring(b"SSISS"));
        assert!(st.has_suffix(b"Ppi"));
        assert_eq!(st.positions(b"ISS"), vec![4, 1]);

        let st = UkkonenTree::new(b"MiSSissIPPI");
        assert!(!st.has_substring(b"ssiss"));
        assert!(st.has_substring(b"SSiss"));
    }

    #[test]
    fn suffix_links_drop_first_symbol() {
        let st = UkkonenTree::new(b"mississippi");
        for node in (1..st.node_count()).map(NodeId) {
            if st.is_leaf(node) {
                continue;
            }
            let link = st.suffix_link(node).unwrap();
            let full = path(&st, node).unwrap();
            assert_eq!(path(&st, link).unwrap(), full[1..].to_vec());
        }
    }

    #[test]
    fn debug_print() {
        let st = UkkonenTree::new(b"aa");
        assert_eq!(
            format!("{:?}", st),
            "UkkonenTree\n(root)\n  $\n  a (link 0)\n    $\n    a$\n"
        );
    }

    use proptest::collection::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]
        #[test]
        fn agrees_with_positional_tree(s in vec(1u8..4, 0..120), q in vec(1u8..4, 0..6)) {
            let st = UkkonenTree::new(&s);
            let mut terminated = s.clone();
            terminated.push(0u8);
            let reference = PositionalSuffixTree::new(&terminated);

            prop_assert_eq!(st.suffix_indices(), suffix_array(&terminated));
            prop_assert_eq!(st.node_count(), reference.node_count());
            prop_assert_eq!(st.has_substring(&q), reference.has_substring(&q));
            prop_assert_eq!(st.has_suffix(&q), reference.has_suffix(&q));
            prop_assert_eq!(st.positions(&q), reference.positions(&q));
            prop_assert_eq!(st.find_substring(&q), reference.find_substring(&q));
        }

        #[test]
        fn agrees_with_positional_tree_wide(s in vec(1u8..=u8::MAX, 0..200), i in 0usize..200, len in 0usize..6) {
            let st = UkkonenTree::new(&s);
            let mut terminated = s.clone();
            terminated.push(0u8);
            let reference = PositionalSuffixTree::new(&terminated);

            prop_assert_eq!(st.suffix_indices(), suffix_array(&terminated));
            prop_assert_eq!(st.node_count(), reference.node_count());
            for node in (0..st.node_count()).map(NodeId) {
                let keys: Vec<_> = st.children(node).map(|child| st.label(child).next()).collect();
                prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
            }

            let lo = i.min(s.len());
            let q = &s[lo..(lo + len).min(s.len())];
            prop_assert!(st.has_substring(q));
            prop_assert_eq!(st.has_suffix(q), reference.has_suffix(q));
            prop_assert_eq!(st.positions(q), reference.positions(q));
        }

        #[test]
        fn substring_duality(s in vec(1u8..4, 1..80), i in 0usize..80, j in 0usize..80) {
            let st = UkkonenTree::new(&s);
            let (i, j) = (i % s.len(), j % s.len());
            let (lo, hi) = if i <= j { (i, j + 1) } else { (j, i + 1) };
            prop_assert!(st.has_substring(&s[lo..hi]));
            prop_assert!(st.has_suffix(&s[lo..]));
            let found = st.find_substring(&s[lo..hi]).unwrap();
            prop_assert_eq!(&s[found..found + hi - lo], &s[lo..hi]);
        }
    }
}
