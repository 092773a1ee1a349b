//! MCTS tree node representation.
//!
//! Each node holds one canonical game state (the player to move is always
//! `Player::One`). Statistics live on the outgoing edges: `N(s,a)`, `W(s,a)`
//! and the prior `P(s,a)`, all from the point of view of the player to move
//! at the node. Child nodes are created lazily the first time an edge is
//! traversed.

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// An outgoing edge `(s, a)`.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Action index in the node's canonical frame
    pub action: usize,

    /// Prior probability P(s,a) from the evaluator
    pub prior: f32,

    /// N(s,a)
    pub visit_count: u32,

    /// W(s,a), from the perspective of the player to move at `s`
    pub value_sum: f32,

    /// Child node, `NONE` until the edge is first traversed
    pub child: NodeId,
}

impl Edge {
    pub fn new(action: usize, prior: f32) -> Self {
        Self {
            action,
            prior,
            visit_count: 0,
            value_sum: 0.0,
            child: NodeId::NONE,
        }
    }

    /// Q(s,a) = W(s,a) / N(s,a), or 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f32
        }
    }

    /// PUCT score Q(s,a) + U(s,a) with
    /// `U = c_puct * P(s,a) * sqrt(N(s) + 1e-8) / (1 + N(s,a))`.
    ///
    /// Takes the pre-computed `sqrt(N(s) + 1e-8)` so it is computed once per
    /// selection rather than once per edge.
    #[inline]
    pub fn puct_score(&self, parent_visits_sqrt: f32, c_puct: f32) -> f32 {
        let u = c_puct * self.prior * parent_visits_sqrt / (1.0 + self.visit_count as f32);
        self.mean_value() + u
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<S, F> {
    /// Canonical game state at this node
    pub state: S,

    /// Transposition key of `state`
    pub fingerprint: F,

    /// N(s): number of simulations that passed through this node
    pub visit_count: u32,

    /// Whether this is a terminal state (game over)
    pub is_terminal: bool,

    /// Exact outcome for the player to move (only valid if is_terminal)
    pub terminal_value: f32,

    /// Whether the evaluator has been queried and edges created
    pub is_expanded: bool,

    /// One edge per legal action, in ascending action order
    pub edges: Vec<Edge>,
}

impl<S, F> MctsNode<S, F> {
    pub fn new(state: S, fingerprint: F) -> Self {
        Self {
            state,
            fingerprint,
            visit_count: 0,
            is_terminal: false,
            terminal_value: 0.0,
            is_expanded: false,
            edges: Vec::new(),
        }
    }

    pub fn new_terminal(state: S, fingerprint: F, terminal_value: f32) -> Self {
        Self {
            is_terminal: true,
            terminal_value,
            ..Self::new(state, fingerprint)
        }
    }

    /// Check if this is a leaf node (not expanded or terminal).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_terminal || !self.is_expanded
    }

    /// Mean value over all edges, from the perspective of the player to move.
    pub fn mean_value(&self) -> f32 {
        let (visits, value) = self
            .edges
            .iter()
            .fold((0u32, 0.0f32), |(n, w), e| (n + e.visit_count, w + e.value_sum));
        if visits == 0 {
            0.0
        } else {
            value / visits as f32
        }
    }

    /// Get the most visited edge, lowest action first on ties.
    pub fn best_edge_by_visits(&self) -> Option<&Edge> {
        self.edges
            .iter()
            .rev()
            .max_by_key(|edge| edge.visit_count)
    }
}
