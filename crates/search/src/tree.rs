//! Search tree
//!
//! Each node owns its own clone of the engine, locked after the node's placement. A node
//! is expanded in two phases: every candidate placement is simulated and scored, then
//! only the `beam_width` best survive and are recursed into. Aggregation runs bottom-up
//! once expansion is complete:
//!
//! - a leaf scores its raw heuristic value
//! - an internal node scores `(raw + best child) / 2`
//!
//! After a move is committed the chosen child becomes the new root, so its subtree is
//! reused on the next turn as long as the live game still matches it.

use std::fmt;

use log::{debug, trace, warn};
use tetro_duel_core::{GameState, LockOutcome};

use crate::config::SearchConfig;
use crate::eval::Evaluator;
use crate::place::{apply_placement, candidate_placements, Placement};

/// Indices of the `n` highest scores, in ascending index order.
/// Equal scores keep enumeration order.
pub fn select_top_n(scores: &[f64], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order.truncate(n);
    order.sort_unstable();
    order
}

/// Score of an internal node from its raw score and its best child's score
pub fn combine_scores(raw: f64, best_child: f64) -> f64 {
    (raw + best_child) / 2.0
}

#[derive(Debug, Clone)]
pub struct Node {
    state: GameState,
    placement: Option<Placement>,
    raw_score: f64,
    score: f64,
    depth: usize,
    children: Vec<Node>,
}

impl Node {
    /// Root node over a live position. Outgoing garbage belongs to the live game, so the
    /// node's copy starts empty.
    pub fn root(mut state: GameState) -> Self {
        state.take_sent_garbage();
        Self {
            state,
            placement: None,
            raw_score: 0.0,
            score: 0.0,
            depth: 1,
            children: Vec::new(),
        }
    }

    /// Simulate `placement` from `parent`, lock it and score the result.
    /// Returns `None` if the placement cannot be applied.
    pub fn simulate(
        parent: &GameState,
        placement: Placement,
        depth: usize,
        evaluator: &Evaluator,
    ) -> Option<Self> {
        let mut state = parent.clone();
        if let Err(err) = apply_placement(&mut state, &placement) {
            trace!("skipping {}: {}", placement, err);
            return None;
        }
        state.soft_drop();
        let outcome = state.lock_piece();
        // Attack is already in `outcome`; nodes never deliver garbage
        state.take_sent_garbage();

        let raw_score = if state.game_over() {
            f64::NEG_INFINITY
        } else {
            evaluator.evaluate(&state, &outcome)
        };

        Some(Self {
            state,
            placement: Some(placement),
            raw_score,
            score: raw_score,
            depth,
            children: Vec::new(),
        })
    }

    /// Build a detached node with a known raw score, for tests and tools
    pub fn with_score(state: GameState, raw_score: f64, depth: usize) -> Self {
        Self {
            raw_score,
            score: raw_score,
            depth,
            ..Self::root(state)
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn raw_score(&self) -> f64 {
        self.raw_score
    }

    /// Aggregated score, valid after [`Node::aggregate`]
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Nodes whose game has ended are never expanded
    pub fn is_terminal(&self) -> bool {
        self.state.game_over()
    }

    /// Total number of nodes in this subtree
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }

    /// Generate, score and prune children where missing, then recurse while the depth
    /// limit allows.
    pub fn expand(&mut self, config: &SearchConfig) {
        if self.is_terminal() {
            return;
        }

        if self.children.is_empty() {
            let children: Vec<Node> = candidate_placements(&self.state)
                .into_iter()
                .filter_map(|p| Node::simulate(&self.state, p, self.depth + 1, &config.evaluator))
                .collect();
            let generated = children.len();
            self.children = children;
            self.prune(config.beam_width);
            trace!(
                "depth {}: generated {} children, kept {}",
                self.depth,
                generated,
                self.children.len()
            );
        }

        if self.depth + 1 < config.max_depth {
            expand_children(&mut self.children, config);
        }
    }

    /// Keep the `n` children with the highest raw scores
    pub fn prune(&mut self, n: usize) {
        if self.children.len() <= n {
            return;
        }
        let scores: Vec<f64> = self.children.iter().map(|c| c.raw_score).collect();
        let keep = select_top_n(&scores, n);
        let children = std::mem::take(&mut self.children);
        self.children = children
            .into_iter()
            .enumerate()
            .filter(|(i, _)| keep.binary_search(i).is_ok())
            .map(|(_, child)| child)
            .collect();
    }

    /// Recompute aggregated scores bottom-up and return this node's score
    pub fn aggregate(&mut self) -> f64 {
        if self.children.is_empty() {
            self.score = self.raw_score;
            return self.score;
        }
        let best = self
            .children
            .iter_mut()
            .map(Node::aggregate)
            .fold(f64::NEG_INFINITY, f64::max);
        self.score = combine_scores(self.raw_score, best);
        self.score
    }

    /// Index of the child with the highest aggregated score (first on ties)
    pub fn best_child_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, child) in self.children.iter().enumerate() {
            match best {
                Some((_, score)) if child.score <= score => {}
                _ => best = Some((i, child.score)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Shift this subtree one level up after its parent was committed
    fn reduce_depth(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        for child in &mut self.children {
            child.reduce_depth();
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let label = self
            .placement
            .map_or_else(|| "root".to_string(), |p| p.to_string());
        writeln!(
            f,
            "{:indent$}[{}] {} raw={:.3} score={:.3}",
            "",
            self.depth,
            label,
            self.raw_score,
            self.score,
            indent = indent * 2
        )?;
        for child in &self.children {
            child.write_indented(f, indent + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

#[cfg(feature = "parallel")]
fn expand_children(children: &mut [Node], config: &SearchConfig) {
    use rayon::prelude::*;
    children.par_iter_mut().for_each(|child| child.expand(config));
}

#[cfg(not(feature = "parallel"))]
fn expand_children(children: &mut [Node], config: &SearchConfig) {
    for child in children {
        child.expand(config);
    }
}

/// A committed move
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub placement: Placement,
    pub outcome: LockOutcome,
    /// Aggregated score of the chosen child
    pub score: f64,
}

/// Tree-search player for one engine
#[derive(Debug, Clone)]
pub struct Agent {
    config: SearchConfig,
    root: Option<Node>,
    rebuilds: usize,
}

impl Agent {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            root: None,
            rebuilds: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Times the tree had to be built from scratch
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Bring the tree up to date with `live` and score it.
    /// Returns the best child of the root, if any.
    pub fn think(&mut self, live: &GameState) -> Option<&Node> {
        let reusable = self
            .root
            .as_ref()
            .is_some_and(|root| root.state.same_timeline(live));
        if !reusable {
            if self.root.is_some() {
                debug!("live game diverged from the search tree, rebuilding");
            }
            self.root = Some(Node::root(live.clone()));
            self.rebuilds += 1;
        }

        let config = self.config;
        let root = self.root.as_mut()?;
        root.expand(&config);
        root.aggregate();
        trace!("search tree holds {} nodes", root.size());

        let root = self.root.as_ref()?;
        root.best_child_index().map(|i| &root.children[i])
    }

    /// Play the best child of the current tree on `live` and re-root the tree there.
    pub fn commit(&mut self, live: &mut GameState) -> Option<Decision> {
        if live.game_over() {
            return None;
        }
        let mut root = self.root.take()?;
        let index = root.best_child_index()?;
        let mut child = root.children.swap_remove(index);
        let placement = child.placement?;

        if let Err(err) = apply_placement(live, &placement) {
            warn!("could not play {}: {}", placement, err);
            return None;
        }
        let outcome = live.hard_drop();

        child.reduce_depth();
        let score = child.score;
        self.root = Some(child);

        debug!(
            "played {} (score {:.3}, attack {}, type {})",
            placement,
            score,
            outcome.attack,
            outcome.placement_type_index()
        );

        Some(Decision {
            placement,
            outcome,
            score,
        })
    }

    /// Think, then commit
    pub fn play_turn(&mut self, live: &mut GameState) -> Option<Decision> {
        self.think(live);
        self.commit(live)
    }
}
