use crate::AgentRegistry;
use opiniongraph_core::{
    Agent, GraphView, NodeId, OpinionGraphError, RandomParams, Recommender, Result,
};
use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rustc_hash::FxHashSet;

/// Baseline recommender: uniform samples from the node id space.
///
/// Draws `count + |neighbors|` ids with replacement, deduplicates them in
/// ascending id order, and drops the requester and its neighbors. There is
/// no retry loop when duplicates or exclusions shrink the result below
/// `count`; a shorter list is the accepted outcome.
pub struct RandomRecommender<A> {
    rng: Mutex<StdRng>,
    registry: Option<AgentRegistry<A>>,
}

impl<A: Agent> RandomRecommender<A> {
    pub fn new(params: RandomParams) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
            registry: None,
        }
    }
}

impl<A: Agent> Recommender<A> for RandomRecommender<A> {
    fn post_init(&mut self, graph: &dyn GraphView, agents: &[A]) -> Result<()> {
        let registry = AgentRegistry::from_agents(agents)?;
        if registry.len() != graph.node_count() {
            return Err(OpinionGraphError::Registry(format!(
                "agent population ({}) does not match graph node count ({})",
                registry.len(),
                graph.node_count()
            )));
        }
        self.registry = Some(registry);
        Ok(())
    }

    fn recommend(&self, agent: &A, current_neighbors: &[A], count: usize) -> Vec<A> {
        let Some(registry) = self.registry.as_ref() else {
            panic!("recommend called before post_init");
        };
        let n = registry.len();
        if n == 0 || count == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<NodeId> = {
            let mut rng = self.rng.lock();
            (0..count + current_neighbors.len())
                .map(|_| rng.random_range(0..n))
                .collect()
        };
        candidates.sort_unstable();
        candidates.dedup();

        let mut exclude: FxHashSet<NodeId> =
            current_neighbors.iter().map(Agent::node_id).collect();
        exclude.insert(agent.node_id());
        candidates.retain(|v| !exclude.contains(v));
        candidates.truncate(count);

        candidates
            .into_iter()
            .map(|v| registry.lookup(v).clone())
            .collect()
    }

    fn post_step(&mut self, _graph: &dyn GraphView, _changed: &[NodeId]) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opiniongraph_graph::AdjacencyGraph;

    fn initialized(seed: u64, n: usize) -> RandomRecommender<NodeId> {
        let mut rec = RandomRecommender::new(RandomParams { seed: Some(seed) });
        let graph = AdjacencyGraph::with_node_count(n);
        let agents: Vec<NodeId> = (0..n).collect();
        rec.post_init(&graph, &agents).unwrap();
        rec
    }

    #[test]
    fn zero_count_returns_empty() {
        let rec = initialized(3, 10);
        assert!(rec.recommend(&0, &[1, 2], 0).is_empty());
    }

    #[test]
    fn output_is_bounded_and_exclusion_free() {
        let rec = initialized(7, 20);
        for count in 0..8 {
            let picked = rec.recommend(&4, &[0, 1, 2], count);
            assert!(picked.len() <= count);
            assert!(!picked.contains(&4), "self recommended");
            for neighbor in [0, 1, 2] {
                assert!(!picked.contains(&neighbor), "neighbor recommended");
            }
        }
    }

    #[test]
    fn candidates_come_back_in_ascending_id_order() {
        let rec = initialized(21, 50);
        let picked = rec.recommend(&0, &[], 10);
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn same_seed_reproduces_the_draw() {
        let a = initialized(42, 30);
        let b = initialized(42, 30);
        assert_eq!(a.recommend(&5, &[6, 7], 4), b.recommend(&5, &[6, 7], 4));
    }

    #[test]
    fn empty_population_yields_empty() {
        let rec = initialized(1, 0);
        assert!(rec.recommend(&0, &[], 3).is_empty());
    }

    #[test]
    fn post_step_is_a_no_op() {
        let mut rec = initialized(9, 5);
        let graph = AdjacencyGraph::with_node_count(5);
        rec.post_step(&graph, &[0, 1]).unwrap();
        let picked = rec.recommend(&0, &[], 2);
        assert!(picked.len() <= 2);
    }

    #[test]
    #[should_panic(expected = "before post_init")]
    fn recommend_before_post_init_panics() {
        let rec = RandomRecommender::<NodeId>::new(RandomParams::default());
        rec.recommend(&0, &[], 1);
    }
}
