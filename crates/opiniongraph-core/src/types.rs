/// Dense node identifier in `[0, n)`.
///
/// Node ids double as direct offsets into the similarity matrix and the
/// agent registry, so the id space must stay contiguous from zero for the
/// lifetime of a simulation. They are never reused or compacted.
pub type NodeId = usize;

/// Capability exposed by the scheduler's agent type.
///
/// The recommendation core only ever needs the dense node id backing an
/// agent handle; everything else about the agent (opinion value, tolerance,
/// ...) stays opaque.
pub trait Agent: Clone {
    fn node_id(&self) -> NodeId;
}

/// Plain node ids are usable as agent handles in tests and in schedulers
/// that do not carry richer per-agent state.
impl Agent for NodeId {
    fn node_id(&self) -> NodeId {
        *self
    }
}
