//! MCTS search implementation.
//!
//! Implements the PUCT search loop:
//! 1. Selection: follow the edge maximising Q + U until a leaf
//! 2. Expansion: query the evaluator on the leaf's canonical state and create
//!    one edge per legal action
//! 3. Evaluation: terminal leaves use the exact outcome instead
//! 4. Backpropagation: update edge statistics along the path, negating the
//!    value once per ply
//!
//! Every node holds the canonical view of its state, so the player to move at
//! a node is always `Player::One` and actions on its edges are in that frame.

use engine_core::{uniform_policy, Game, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::evaluator::{sanitize, Evaluator, EvaluatorError};
use crate::node::{Edge, MctsNode, NodeId};
use crate::tree::MctsTree;

/// Temperatures below this select the most visited action.
const GREEDY_TEMPERATURE: f32 = 1e-6;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Engine error: {0}")]
    EngineError(String),

    #[error("Evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),

    #[error("Cannot search from a terminal state")]
    TerminalState,

    #[error("No legal moves available")]
    NoLegalMoves,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Chosen action, in the searching player's canonical frame
    pub action: usize,

    /// Policy distribution over actions (visit counts at the temperature)
    pub policy: Vec<f32>,

    /// Value estimate at root for the searching player
    pub value: f32,

    /// Number of simulations performed
    pub simulations: u32,
}

/// Summary of one call to [`MctsSearch::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStats {
    /// Simulations executed by this call
    pub simulations: u32,

    /// N(s) at the root after the call, including earlier calls on a reused tree
    pub root_visits: u32,

    /// Nodes in the tree after the call
    pub tree_size: usize,

    /// Whether the existing tree was kept for this root
    pub reused: bool,
}

/// MCTS search state.
///
/// The search owns its tree; the game and evaluator are borrowed.
pub struct MctsSearch<'a, G: Game, E: Evaluator<G>> {
    game: &'a G,
    evaluator: &'a E,
    config: MctsConfig,
    tree: MctsTree<G::State, G::Fingerprint>,
    rng: ChaCha20Rng,
    /// Root that already received exploration noise
    noised_root: Option<G::Fingerprint>,
}

impl<'a, G: Game, E: Evaluator<G>> MctsSearch<'a, G, E> {
    pub fn new(game: &'a G, evaluator: &'a E, config: MctsConfig) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(config.seed);
        Self {
            game,
            evaluator,
            config,
            tree: MctsTree::new(),
            rng,
            noised_root: None,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G::State, G::Fingerprint> {
        &self.tree
    }

    /// Run `num_simulations` simulations from `state` with `player` to move.
    ///
    /// With `reuse_tree` the statistics already gathered below this position
    /// are kept and extended; otherwise the tree is rebuilt.
    pub fn run(
        &mut self,
        state: &G::State,
        player: Player,
        num_simulations: u32,
    ) -> Result<SearchStats, SearchError> {
        if self.game.result(state, player).is_terminal() {
            return Err(SearchError::TerminalState);
        }

        let canonical = self.game.canonical_view(state, player);
        let fingerprint = self.game.fingerprint(&canonical);
        let reused = self.set_root(canonical, fingerprint.clone());

        let root = self.tree.root();
        if !self.tree.get(root).is_expanded {
            // The root evaluation is not a simulation; its value is unused
            self.expand(root)?;
        }

        if self.config.dirichlet_alpha > 0.0 && self.noised_root.as_ref() != Some(&fingerprint) {
            self.add_dirichlet_noise(root);
            self.noised_root = Some(fingerprint);
        }

        for _ in 0..num_simulations {
            self.simulate()?;
        }

        let stats = SearchStats {
            simulations: num_simulations,
            root_visits: self.tree.get(root).visit_count,
            tree_size: self.tree.len(),
            reused,
        };
        debug!(
            simulations = stats.simulations,
            root_visits = stats.root_visits,
            tree_size = stats.tree_size,
            reused,
            "MCTS run complete"
        );
        Ok(stats)
    }

    /// Visit-count distribution over actions at `state`, sharpened by
    /// `temperature`: `N(a)^(1/T)` normalised.
    ///
    /// Below a temperature of 1e-6 the result is one-hot on the most visited
    /// action, ties broken uniformly at random. A state with no root visits
    /// yields the uniform distribution over legal actions.
    pub fn action_probabilities(
        &mut self,
        state: &G::State,
        player: Player,
        temperature: f32,
    ) -> Vec<f32> {
        let canonical = self.game.canonical_view(state, player);
        let fingerprint = self.game.fingerprint(&canonical);
        let legal_mask = self.game.legal_action_mask(&canonical, Player::One);

        let mut counts = vec![0u32; self.game.action_size()];
        if let Some(id) = self.tree.find(&fingerprint) {
            for edge in &self.tree.get(id).edges {
                if let Some(slot) = counts.get_mut(edge.action) {
                    *slot = edge.visit_count;
                }
            }
        }

        let max_count = counts.iter().copied().max().unwrap_or(0);
        if max_count == 0 {
            return uniform_policy(&legal_mask);
        }

        let mut probs = vec![0.0f32; counts.len()];
        if temperature < GREEDY_TEMPERATURE {
            let best: Vec<usize> = (0..counts.len())
                .filter(|&a| counts[a] == max_count)
                .collect();
            let pick = best[self.rng.gen_range(0..best.len())];
            probs[pick] = 1.0;
            return probs;
        }

        // Relative to the max count so large visit totals cannot overflow
        let exponent = 1.0 / temperature as f64;
        let weights: Vec<f64> = counts
            .iter()
            .map(|&c| (c as f64 / max_count as f64).powf(exponent))
            .collect();
        let total: f64 = weights.iter().sum();
        for (p, w) in probs.iter_mut().zip(&weights) {
            *p = (w / total) as f32;
        }
        probs
    }

    /// Run the configured number of simulations and pick an action at the
    /// configured temperature.
    pub fn search(
        &mut self,
        state: &G::State,
        player: Player,
    ) -> Result<SearchResult, SearchError> {
        let stats = self.run(state, player, self.config.num_simulations)?;
        let temperature = self.config.temperature;
        let policy = self.action_probabilities(state, player, temperature);
        let action = sample_action(&policy, &mut self.rng)?;

        let root = self.tree.get(self.tree.root());
        Ok(SearchResult {
            action,
            policy,
            value: root.mean_value(),
            simulations: stats.simulations,
        })
    }

    /// Point the tree at a new root. Returns true if existing statistics
    /// were kept.
    fn set_root(&mut self, canonical: G::State, fingerprint: G::Fingerprint) -> bool {
        if self.config.reuse_tree && self.tree.retain_subtree(&fingerprint) {
            debug!(nodes = self.tree.len(), "Reusing search subtree");
            return true;
        }

        if !self.tree.is_empty() {
            debug!(nodes = self.tree.len(), "Rebuilding search tree");
        }
        self.tree.clear();
        self.noised_root = None;
        let root = self.tree.insert(MctsNode::new(canonical, fingerprint));
        self.tree.set_root(root);
        false
    }

    /// Run a single simulation (select -> expand -> evaluate -> backpropagate).
    fn simulate(&mut self) -> Result<(), SearchError> {
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut current = self.tree.root();

        let value = loop {
            let node = self.tree.get(current);
            if node.is_terminal {
                break node.terminal_value;
            }
            if !node.is_expanded {
                break self.expand(current)?;
            }

            let edge_idx = self
                .tree
                .select_edge(current, self.config.c_puct_base, self.config.c_puct_init)
                .ok_or(SearchError::NoLegalMoves)?;
            path.push((current, edge_idx));
            current = self.child(current, edge_idx)?;
        };

        self.tree.backpropagate(&path, value);

        trace!(
            leaf = current.0,
            depth = path.len(),
            value,
            "MCTS simulation complete"
        );
        Ok(())
    }

    /// Query the evaluator at an unexpanded node and create its edges.
    /// Returns the value estimate for the player to move at the node.
    fn expand(&mut self, node_id: NodeId) -> Result<f32, SearchError> {
        let node = self.tree.get(node_id);
        let legal_mask = self.game.legal_action_mask(&node.state, Player::One);
        if !legal_mask.iter().any(|&legal| legal) {
            return Err(SearchError::NoLegalMoves);
        }

        let eval = self.evaluator.evaluate(&node.state, &legal_mask)?;
        let output = sanitize(&eval, &legal_mask);

        let edges = legal_mask
            .iter()
            .enumerate()
            .filter(|&(_, &legal)| legal)
            .map(|(action, _)| Edge::new(action, output.priors[action]))
            .collect();

        let node = self.tree.get_mut(node_id);
        node.edges = edges;
        node.is_expanded = true;
        Ok(output.value)
    }

    /// Child at the end of an edge, created on first traversal.
    fn child(&mut self, node_id: NodeId, edge_idx: usize) -> Result<NodeId, SearchError> {
        let node = self.tree.get(node_id);
        let edge = &node.edges[edge_idx];
        if edge.child.is_some() {
            return Ok(edge.child);
        }

        let (next, next_player) = self
            .game
            .next_state(&node.state, Player::One, edge.action)
            .map_err(|e| SearchError::EngineError(e.to_string()))?;
        let canonical = self.game.canonical_view(&next, next_player);
        let fingerprint = self.game.fingerprint(&canonical);

        let child = match self.tree.find(&fingerprint) {
            Some(id) => id,
            None => {
                // Exact outcome for the player to move at the child
                let outcome = self.game.result(&canonical, Player::One);
                let node = if outcome.is_terminal() {
                    MctsNode::new_terminal(canonical, fingerprint, outcome.value())
                } else {
                    MctsNode::new(canonical, fingerprint)
                };
                self.tree.insert(node)
            }
        };

        self.tree.get_mut(node_id).edges[edge_idx].child = child;
        Ok(child)
    }

    /// Add Dirichlet noise to root priors for exploration.
    fn add_dirichlet_noise(&mut self, root: NodeId) {
        let num_edges = self.tree.get(root).edges.len();
        if num_edges == 0 {
            return;
        }

        let Some(noise) = dirichlet_noise(num_edges, self.config.dirichlet_alpha, &mut self.rng)
        else {
            return;
        };

        // Mix noise with existing priors
        let eps = self.config.dirichlet_epsilon;
        for (edge, n) in self.tree.get_mut(root).edges.iter_mut().zip(noise) {
            edge.prior = (1.0 - eps) * edge.prior + eps * n;
        }
    }
}

/// Sample an action from a probability distribution.
fn sample_action(policy: &[f32], rng: &mut ChaCha20Rng) -> Result<usize, SearchError> {
    let r: f32 = rng.gen();
    let mut cumsum = 0.0;

    for (i, &p) in policy.iter().enumerate() {
        cumsum += p;
        if r < cumsum {
            return Ok(i);
        }
    }

    // Fallback to last non-zero action (handles floating point issues)
    policy
        .iter()
        .rposition(|&p| p > 0.0)
        .ok_or(SearchError::NoLegalMoves)
}

/// Generate Dirichlet-distributed noise using Gamma variates.
///
/// Returns None if `alpha` is not a valid Gamma shape.
fn dirichlet_noise(n: usize, alpha: f32, rng: &mut ChaCha20Rng) -> Option<Vec<f32>> {
    use rand_distr::{Distribution, Gamma};

    let gamma = Gamma::new(alpha as f64, 1.0).ok()?;
    let mut samples: Vec<f32> = (0..n).map(|_| gamma.sample(rng) as f32).collect();

    // Normalize
    let sum: f32 = samples.iter().sum();
    if sum > 0.0 {
        for s in &mut samples {
            *s /= sum;
        }
    }

    Some(samples)
}
