use opiniongraph_core::NodeId;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Accumulates the nodes touched by one step's rewiring.
///
/// The scheduler records every edge it adds or removes while agents act on
/// their accepted recommendations, then drains the delta into the sorted
/// changed-id list that `Recommender::post_step` expects.
#[derive(Debug, Default, Clone)]
pub struct RewireDelta {
    touched: FxHashSet<NodeId>,
}

impl RewireDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rewired edge; both endpoints count as changed.
    pub fn record_edge(&mut self, u: NodeId, v: NodeId) {
        self.touched.insert(u);
        self.touched.insert(v);
    }

    pub fn record_node(&mut self, node: NodeId) {
        self.touched.insert(node);
    }

    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }

    pub fn len(&self) -> usize {
        self.touched.len()
    }

    /// Sorted, deduplicated changed ids; clears the delta for the next step.
    pub fn drain(&mut self) -> Vec<NodeId> {
        let mut changed: Vec<NodeId> = self.touched.drain().collect();
        changed.sort_unstable();
        debug!(changed = changed.len(), "drained rewiring delta");
        changed
    }
}
