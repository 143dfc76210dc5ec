use crate::tree::NodeId;

/// Outgoing edges of a node, keyed by the first symbol of the edge label.
///
/// Nodes have at most one edge per alphabet symbol and usually only a few, so a vector kept
/// sorted by key beats a tree map here. Iteration yields edges in ascending key order.
#[derive(Clone, Debug)]
pub(crate) struct Children<K> {
    edges: Vec<(K, NodeId)>,
}

impl<K: Ord + Copy> Children<K> {
    pub(crate) fn new() -> Self {
        Self { edges: Vec::new() }
    }

    #[inline]
    pub(crate) fn get(&self, key: K) -> Option<NodeId> {
        self.edges
            .binary_search_by(|(k, _)| k.cmp(&key))
            .ok()
            .map(|i| self.edges[i].1)
    }

    /// Points `key` at `node`, replacing any previous edge for `key`.
    pub(crate) fn insert(&mut self, key: K, node: NodeId) {
        match self.edges.binary_search_by(|(k, _)| k.cmp(&key)) {
            Ok(i) => self.edges[i].1 = node,
            Err(i) => self.edges.insert(i, (key, node)),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = (K, NodeId)> + '_ {
        self.edges.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_insert_and_replace() {
        let mut children = Children::new();
        children.insert(b'n', NodeId(3));
        children.insert(b'$', NodeId(1));
        children.insert(b'a', NodeId(2));
        assert_eq!(
            children.iter().collect::<Vec<_>>(),
            vec![(b'$', NodeId(1)), (b'a', NodeId(2)), (b'n', NodeId(3))]
        );

        children.insert(b'a', NodeId(7));
        assert_eq!(children.len(), 3);
        assert_eq!(children.get(b'a'), Some(NodeId(7)));
        assert_eq!(children.get(b'b'), None);
    }

    #[test]
    fn option_keys_put_none_first() {
        let mut children = Children::new();
        children.insert(Some(b'a'), NodeId(2));
        children.insert(None, NodeId(1));
        assert_eq!(children.iter().next(), Some((None, NodeId(1))));
        assert!(!children.is_empty());
    }
}
