use crate::{Agent, NodeId, Result};
use rustc_hash::FxHashSet;

/// Read-only capability over the simulation's directed social graph.
///
/// The graph itself is owned by the scheduler; the recommendation core only
/// needs predecessor/successor lookups and the node count, so this trait is
/// the whole dependency surface. Implementations return owned sets; callers
/// that need them repeatedly (the matrix build) fetch each node's sets once
/// and cache them.
pub trait GraphView {
    /// Total number of nodes. Ids are dense in `[0, node_count())`.
    fn node_count(&self) -> usize;

    /// Nodes with an edge into `node`.
    fn predecessors(&self, node: NodeId) -> FxHashSet<NodeId>;

    /// Nodes `node` has an edge to.
    fn successors(&self, node: NodeId) -> FxHashSet<NodeId>;

    /// Direction-agnostic neighbor set `N(node) = Pred(node) ∪ Succ(node)`.
    fn neighbors(&self, node: NodeId) -> FxHashSet<NodeId> {
        let mut set = self.predecessors(node);
        set.extend(self.successors(node));
        set
    }
}

/// Lifecycle contract between the scheduler and a recommendation strategy.
///
/// Per simulation step the scheduler runs a read phase (any number of
/// `recommend` calls against frozen internal state) followed by a single
/// write phase (`post_step`, after the graph has already been rewired).
/// The `&self` / `&mut self` split makes that barrier a compile-time
/// property: no `recommend` borrow can be alive across a `post_step`.
pub trait Recommender<A: Agent> {
    /// Called once, after the graph and the full agent population exist.
    fn post_init(&mut self, graph: &dyn GraphView, agents: &[A]) -> Result<()>;

    /// Hook at the start of a step. No required behavior.
    fn pre_step(&mut self) {}

    /// Propose up to `count` new connections for `agent`.
    ///
    /// Returned handles never include `agent` itself or anything in
    /// `current_neighbors`; fewer than `count` results is a normal outcome,
    /// not an error. Must not mutate shared state (the internal RNG draw is
    /// the sole documented exception).
    fn recommend(&self, agent: &A, current_neighbors: &[A], count: usize) -> Vec<A>;

    /// Called exactly once per step, after all `recommend` calls and after
    /// the graph mutations. `changed` lists every node whose incoming or
    /// outgoing edges were touched by the step's rewiring.
    fn post_step(&mut self, graph: &dyn GraphView, changed: &[NodeId]) -> Result<()>;

    /// Hook at the end of a step. No required behavior.
    fn pre_commit(&mut self) {}
}
