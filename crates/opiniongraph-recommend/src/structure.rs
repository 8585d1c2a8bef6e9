use crate::{AgentRegistry, SimilarityMatrix};
use opiniongraph_core::{
    Agent, GraphView, NodeId, OpinionGraphError, Recommender, Result, StructureParams,
};
use parking_lot::Mutex;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rustc_hash::FxHashSet;
use tracing::trace;

/// Recommends connections by perturbed structural similarity.
///
/// Raw scores come from the shared-neighbor matrix; per-node Gaussian noise
/// and the `eta` contrast exponent shape them, then the candidate pool is
/// the `count + |neighbors|` *lowest*-scoring nodes (ascending selection,
/// an open product question tracked in DESIGN.md).
pub struct StructureRecommender<A> {
    params: StructureParams,
    noise: Normal<f64>,
    rng: Mutex<StdRng>,
    state: Option<State<A>>,
}

struct State<A> {
    matrix: SimilarityMatrix,
    registry: AgentRegistry<A>,
}

impl<A: Agent> StructureRecommender<A> {
    /// `params` are normalized first: negative `eta`/`sigma` are
    /// sign-flipped, not rejected.
    pub fn new(params: StructureParams) -> Result<Self> {
        let params = params.normalized();
        let noise = Normal::new(0.0, params.sigma)
            .map_err(|e| OpinionGraphError::Config(format!("invalid noise spread: {e}")))?;
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            params,
            noise,
            rng: Mutex::new(rng),
            state: None,
        })
    }

    pub fn params(&self) -> &StructureParams {
        &self.params
    }

    /// The backing matrix, once `post_init` has run.
    pub fn similarity_matrix(&self) -> Option<&SimilarityMatrix> {
        self.state.as_ref().map(|state| &state.matrix)
    }
}

impl<A: Agent> Recommender<A> for StructureRecommender<A> {
    fn post_init(&mut self, graph: &dyn GraphView, agents: &[A]) -> Result<()> {
        let registry = AgentRegistry::from_agents(agents)?;
        if registry.len() != graph.node_count() {
            return Err(OpinionGraphError::Registry(format!(
                "agent population ({}) does not match graph node count ({})",
                registry.len(),
                graph.node_count()
            )));
        }
        let matrix = SimilarityMatrix::build(graph);
        self.state = Some(State { matrix, registry });
        Ok(())
    }

    fn recommend(&self, agent: &A, current_neighbors: &[A], count: usize) -> Vec<A> {
        let Some(state) = self.state.as_ref() else {
            panic!("recommend called before post_init");
        };
        let requester = agent.node_id();
        let n = state.matrix.node_count();
        let pool_size = count + current_neighbors.len();

        let mut scored: Vec<(NodeId, f64)> = Vec::with_capacity(n.saturating_sub(1));
        {
            let mut rng = self.rng.lock();
            for v in 0..n {
                if v == requester {
                    continue;
                }
                let raw = f64::from(state.matrix.similarity_of(v, requester));
                let eps = self.noise.sample(&mut *rng);
                let mut score = raw * (1.0 - 2.0 * eps) + eps;
                if score < 0.0 {
                    score = 0.0;
                }
                if self.params.eta != 1.0 {
                    score = score.powf(self.params.eta);
                }
                scored.push((v, score));
            }
        }

        // Keep the pool_size smallest scores. Ties break on node id so the
        // pre-exclusion ordering is a total function of the scores.
        let ascending =
            |a: &(NodeId, f64), b: &(NodeId, f64)| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0));
        if pool_size < scored.len() {
            scored.select_nth_unstable_by(pool_size, ascending);
            scored.truncate(pool_size);
        }
        scored.sort_unstable_by(ascending);

        let exclude: FxHashSet<NodeId> = current_neighbors.iter().map(Agent::node_id).collect();
        let picked: Vec<A> = scored
            .into_iter()
            .filter(|(v, _)| !exclude.contains(v))
            .take(count)
            .map(|(v, _)| state.registry.lookup(v).clone())
            .collect();
        trace!(
            requester,
            requested = count,
            returned = picked.len(),
            "structure recommendation"
        );
        picked
    }

    fn post_step(&mut self, graph: &dyn GraphView, changed: &[NodeId]) -> Result<()> {
        let state = self.state.as_mut().ok_or_else(|| {
            OpinionGraphError::InvalidOperation("post_step called before post_init".into())
        })?;
        state.matrix.update(graph, changed);
        Ok(())
    }
}
