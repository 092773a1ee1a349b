//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices. A
//! fingerprint index lets transposed move orders share one node, so the
//! structure is a DAG rather than a strict tree. States carry a ply counter,
//! so edges always lead strictly deeper and the graph has no cycles.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::node::{MctsNode, NodeId};

/// Arena of search nodes keyed by state fingerprint.
#[derive(Debug)]
pub struct MctsTree<S, F> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S, F>>,

    /// Fingerprint -> node
    index: HashMap<F, NodeId>,

    /// Root node index, NONE while the tree is empty
    root: NodeId,
}

impl<S, F: Clone + Eq + Hash> Default for MctsTree<S, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, F: Clone + Eq + Hash> MctsTree<S, F> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            root: NodeId::NONE,
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = id;
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S, F> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S, F> {
        &mut self.nodes[id.0 as usize]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up the node for a fingerprint.
    pub fn find(&self, fingerprint: &F) -> Option<NodeId> {
        self.index.get(fingerprint).copied()
    }

    /// Add a node, or return the existing node with the same fingerprint.
    pub fn insert(&mut self, node: MctsNode<S, F>) -> NodeId {
        if let Some(id) = self.find(&node.fingerprint) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.index.insert(node.fingerprint.clone(), id);
        self.nodes.push(node);
        id
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.root = NodeId::NONE;
    }

    /// Select the edge maximising Q + U at a node, lowest action on ties.
    ///
    /// `c_puct(s) = ln((1 + N(s) + c_base) / c_base) + c_init`
    pub fn select_edge(&self, node_id: NodeId, c_base: f32, c_init: f32) -> Option<usize> {
        let node = self.get(node_id);
        let parent_visits = node.visit_count as f32;
        let c_puct = ((1.0 + parent_visits + c_base) / c_base).ln() + c_init;
        // Pre-compute sqrt once instead of per-edge comparison
        let parent_visits_sqrt = (parent_visits + 1e-8).sqrt();

        let mut best: Option<(usize, f32)> = None;
        for (idx, edge) in node.edges.iter().enumerate() {
            let score = edge.puct_score(parent_visits_sqrt, c_puct);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Backpropagate a leaf value along `path`, a list of `(node, edge index)`
    /// pairs from the root down. `leaf_value` is from the perspective of the
    /// player to move at the leaf; it is negated once per ply on the way up.
    pub fn backpropagate(&mut self, path: &[(NodeId, usize)], leaf_value: f32) {
        let mut value = leaf_value;
        for &(node_id, edge_idx) in path.iter().rev() {
            // Negate for the player who chose the edge
            value = -value;
            let node = self.get_mut(node_id);
            node.visit_count += 1;
            let edge = &mut node.edges[edge_idx];
            edge.visit_count += 1;
            edge.value_sum += value;
        }
    }

    /// Visit count of every root edge, indexed by action.
    pub fn root_visit_counts(&self, num_actions: usize) -> Vec<u32> {
        let mut counts = vec![0; num_actions];
        if self.root.is_none() {
            return counts;
        }
        for edge in &self.get(self.root).edges {
            if let Some(slot) = counts.get_mut(edge.action) {
                *slot = edge.visit_count;
            }
        }
        counts
    }

    /// Make the node for `fingerprint` the root and discard everything not
    /// reachable from it. Returns false, leaving the tree untouched, if the
    /// fingerprint is unknown.
    pub fn retain_subtree(&mut self, fingerprint: &F) -> bool {
        let Some(new_root) = self.find(fingerprint) else {
            return false;
        };

        // Breadth-first renumbering of the reachable part
        let mut remap = vec![NodeId::NONE; self.nodes.len()];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([new_root]);
        remap[new_root.0 as usize] = NodeId(0);
        order.push(new_root);
        while let Some(id) = queue.pop_front() {
            for edge in &self.get(id).edges {
                let child = edge.child;
                if child.is_some() && remap[child.0 as usize].is_none() {
                    remap[child.0 as usize] = NodeId(order.len() as u32);
                    order.push(child);
                    queue.push_back(child);
                }
            }
        }

        let mut old: Vec<Option<MctsNode<S, F>>> = self.nodes.drain(..).map(Some).collect();
        self.index.clear();
        for (new_id, old_id) in order.into_iter().enumerate() {
            let Some(mut node) = old[old_id.0 as usize].take() else {
                continue;
            };
            for edge in &mut node.edges {
                if edge.child.is_some() {
                    edge.child = remap[edge.child.0 as usize];
                }
            }
            self.index.insert(node.fingerprint.clone(), NodeId(new_id as u32));
            self.nodes.push(node);
        }
        self.root = NodeId(0);
        true
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        if self.root.is_none() {
            return TreeStats::default();
        }
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.mean_value(),
            max_depth: self.compute_max_depth(),
            terminal_nodes: self.nodes.iter().filter(|n| n.is_terminal).count(),
        }
    }

    // Every path to a node has the same length (one ply per edge), so BFS
    // depth is the node's depth.
    fn compute_max_depth(&self) -> u32 {
        let mut depth = vec![u32::MAX; self.nodes.len()];
        let mut queue = VecDeque::from([self.root]);
        depth[self.root.0 as usize] = 0;
        let mut max_depth = 0;
        while let Some(id) = queue.pop_front() {
            let d = depth[id.0 as usize];
            max_depth = max_depth.max(d);
            for edge in &self.get(id).edges {
                let child = edge.child;
                if child.is_some() && depth[child.0 as usize] == u32::MAX {
                    depth[child.0 as usize] = d + 1;
                    queue.push_back(child);
                }
            }
        }
        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, Default)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f32,
    pub max_depth: u32,
    pub terminal_nodes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Edge;

    /// Root (key 0) with edges to keys 1 and 2; key 1 has an edge to key 3.
    fn small_tree() -> MctsTree<u32, u32> {
        let mut tree = MctsTree::new();
        let root = tree.insert(MctsNode::new(0, 0));
        tree.set_root(root);
        let a = tree.insert(MctsNode::new(1, 1));
        let b = tree.insert(MctsNode::new(2, 2));
        let c = tree.insert(MctsNode::new(3, 3));

        let node = tree.get_mut(root);
        node.is_expanded = true;
        node.edges = vec![Edge::new(0, 0.5), Edge::new(1, 0.5)];
        node.edges[0].child = a;
        node.edges[1].child = b;

        let node = tree.get_mut(a);
        node.is_expanded = true;
        node.edges = vec![Edge::new(4, 1.0)];
        node.edges[0].child = c;
        tree
    }

    #[test]
    fn test_new_tree() {
        let tree: MctsTree<u32, u32> = MctsTree::new();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert_eq!(tree.stats().total_nodes, 0);
    }

    #[test]
    fn test_insert_shares_transpositions() {
        let mut tree: MctsTree<&str, u32> = MctsTree::new();
        let first = tree.insert(MctsNode::new("a", 17));
        let second = tree.insert(MctsNode::new("a again", 17));
        assert_eq!(first, second);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(first).state, "a");
        assert_eq!(tree.find(&17), Some(first));
        assert_eq!(tree.find(&18), None);
    }

    #[test]
    fn test_backpropagate() {
        let mut tree = small_tree();
        let root = tree.root();
        let a = tree.get(root).edges[0].child;

        // Leaf value 1.0 for the player to move at the grandchild
        tree.backpropagate(&[(root, 0), (a, 0)], 1.0);

        assert_eq!(tree.get(root).visit_count, 1);
        assert_eq!(tree.get(a).visit_count, 1);
        // Negated once per ply
        assert!((tree.get(a).edges[0].value_sum + 1.0).abs() < 1e-6);
        assert!((tree.get(root).edges[0].value_sum - 1.0).abs() < 1e-6);
        assert_eq!(tree.get(root).edges[1].visit_count, 0);
    }

    #[test]
    fn test_select_edge_prefers_prior_then_value() {
        let mut tree = small_tree();
        let root = tree.root();
        tree.get_mut(root).edges[1].prior = 0.7;
        tree.get_mut(root).edges[0].prior = 0.3;

        // Unvisited: higher prior wins
        assert_eq!(tree.select_edge(root, 19652.0, 2.5), Some(1));

        // A strongly positive Q overrides the prior
        let node = tree.get_mut(root);
        node.visit_count = 10;
        node.edges[0].visit_count = 5;
        node.edges[0].value_sum = 5.0;
        node.edges[1].visit_count = 5;
        node.edges[1].value_sum = -5.0;
        assert_eq!(tree.select_edge(root, 19652.0, 2.5), Some(0));
    }

    #[test]
    fn test_select_edge_ties_go_to_lowest_action() {
        let tree = small_tree();
        assert_eq!(tree.select_edge(tree.root(), 19652.0, 2.5), Some(0));
    }

    #[test]
    fn test_root_visit_counts() {
        let mut tree = small_tree();
        let root = tree.root();
        tree.get_mut(root).edges[1].visit_count = 3;
        assert_eq!(tree.root_visit_counts(3), vec![0, 3, 0]);
    }

    #[test]
    fn test_retain_subtree() {
        let mut tree = small_tree();
        let root = tree.root();
        tree.get_mut(root).edges[0].visit_count = 2;

        assert!(tree.retain_subtree(&1));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root(), NodeId(0));
        assert_eq!(tree.get(tree.root()).state, 1);
        let child = tree.get(tree.root()).edges[0].child;
        assert_eq!(tree.get(child).state, 3);
        assert_eq!(tree.find(&3), Some(child));
        assert_eq!(tree.find(&0), None);
        assert_eq!(tree.find(&2), None);
    }

    #[test]
    fn test_retain_unknown_fingerprint() {
        let mut tree = small_tree();
        assert!(!tree.retain_subtree(&99));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = small_tree();
        tree.get_mut(NodeId(3)).is_terminal = true;
        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.terminal_nodes, 1);
    }
}
