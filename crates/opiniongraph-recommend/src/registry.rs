use opiniongraph_core::{Agent, NodeId, OpinionGraphError, Result};

/// Dense node-id to agent-handle table.
///
/// Built once per recommender instance from the full agent population;
/// construction fails unless the ids form a permutation of `0..n`. Each
/// recommender owns its registry; the table is never shared across
/// instances.
#[derive(Debug, Clone)]
pub struct AgentRegistry<A> {
    agents: Vec<A>,
}

impl<A: Agent> AgentRegistry<A> {
    pub fn from_agents(agents: &[A]) -> Result<Self> {
        let n = agents.len();
        let mut slots: Vec<Option<A>> = (0..n).map(|_| None).collect();
        for agent in agents {
            let id = agent.node_id();
            if id >= n {
                return Err(OpinionGraphError::Registry(format!(
                    "agent id {id} outside dense range 0..{n}"
                )));
            }
            if slots[id].is_some() {
                return Err(OpinionGraphError::Registry(format!("duplicate agent id {id}")));
            }
            slots[id] = Some(agent.clone());
        }
        // n distinct ids below n fill every slot.
        Ok(Self {
            agents: slots.into_iter().flatten().collect(),
        })
    }

    /// Handle for `node`. Panics if the id is outside `[0, n)`; the id
    /// space is contiguous and fixed for the simulation's lifetime.
    pub fn lookup(&self, node: NodeId) -> &A {
        assert!(
            node < self.agents.len(),
            "node id {node} outside registry range 0..{}",
            self.agents.len()
        );
        &self.agents[node]
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.agents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestAgent {
        id: NodeId,
        opinion: f64,
    }

    impl Agent for TestAgent {
        fn node_id(&self) -> NodeId {
            self.id
        }
    }

    fn agent(id: NodeId) -> TestAgent {
        TestAgent {
            id,
            opinion: id as f64 * 0.1,
        }
    }

    #[test]
    fn accepts_any_permutation_of_dense_ids() {
        let registry = AgentRegistry::from_agents(&[agent(2), agent(0), agent(1)]).unwrap();
        assert_eq!(registry.len(), 3);
        for id in 0..3 {
            assert_eq!(registry.lookup(id), &agent(id));
        }
        assert_eq!(registry.iter().count(), 3);
    }

    #[test]
    fn rejects_out_of_range_ids() {
        let err = AgentRegistry::from_agents(&[agent(0), agent(2)]).unwrap_err();
        assert!(err.to_string().contains("outside dense range"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = AgentRegistry::from_agents(&[agent(0), agent(0)]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    #[should_panic(expected = "outside registry range")]
    fn lookup_past_the_population_panics() {
        let registry = AgentRegistry::from_agents(&[agent(0)]).unwrap();
        registry.lookup(1);
    }

    #[test]
    fn empty_population_is_valid() {
        let registry = AgentRegistry::<TestAgent>::from_agents(&[]).unwrap();
        assert!(registry.is_empty());
    }
}
