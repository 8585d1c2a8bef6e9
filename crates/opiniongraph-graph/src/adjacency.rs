use opiniongraph_core::{GraphView, NodeId, OpinionGraphError, Result};
use rustc_hash::FxHashSet;

/// In-memory directed graph over a fixed, dense node id space.
///
/// Both adjacency directions are materialized so predecessor and successor
/// lookups are symmetric in cost. Nodes are never added or removed after
/// construction; only edges are rewired.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    pred: Vec<FxHashSet<NodeId>>,
    succ: Vec<FxHashSet<NodeId>>,
}

impl AdjacencyGraph {
    pub fn with_node_count(node_count: usize) -> Self {
        Self {
            pred: vec![FxHashSet::default(); node_count],
            succ: vec![FxHashSet::default(); node_count],
        }
    }

    pub fn from_edges(node_count: usize, edges: &[(NodeId, NodeId)]) -> Result<Self> {
        let mut graph = Self::with_node_count(node_count);
        for &(u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    fn check_endpoints(&self, u: NodeId, v: NodeId) -> Result<()> {
        let n = self.pred.len();
        if u >= n || v >= n {
            return Err(OpinionGraphError::Graph(format!(
                "edge ({u}, {v}) outside node range 0..{n}"
            )));
        }
        if u == v {
            return Err(OpinionGraphError::Graph(format!("self-loop on node {u}")));
        }
        Ok(())
    }

    /// Insert the directed edge `u -> v`. Returns `false` if it was already
    /// present.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool> {
        self.check_endpoints(u, v)?;
        let inserted = self.succ[u].insert(v);
        self.pred[v].insert(u);
        Ok(inserted)
    }

    /// Remove the directed edge `u -> v`. Returns `false` if it was not
    /// present.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool> {
        self.check_endpoints(u, v)?;
        let removed = self.succ[u].remove(&v);
        self.pred[v].remove(&u);
        Ok(removed)
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.succ.get(u).is_some_and(|set| set.contains(&v))
    }

    pub fn edge_count(&self) -> usize {
        self.succ.iter().map(FxHashSet::len).sum()
    }
}

impl GraphView for AdjacencyGraph {
    fn node_count(&self) -> usize {
        self.pred.len()
    }

    fn predecessors(&self, node: NodeId) -> FxHashSet<NodeId> {
        self.pred[node].clone()
    }

    fn successors(&self, node: NodeId) -> FxHashSet<NodeId> {
        self.succ[node].clone()
    }
}
