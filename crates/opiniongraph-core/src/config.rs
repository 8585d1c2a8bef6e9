use crate::Result;
use serde::{Deserialize, Serialize};

/// Parameters for the structure-based recommender.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureParams {
    /// Contrast exponent applied to perturbed scores. Values above 1 sharpen
    /// the separation toward high scores, values below 1 compress it.
    #[serde(default = "StructureParams::default_eta")]
    pub eta: f64,
    /// Spread of the per-node Gaussian noise.
    #[serde(default = "StructureParams::default_sigma")]
    pub sigma: f64,
    /// RNG seed; `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl StructureParams {
    fn default_eta() -> f64 {
        1.0
    }

    fn default_sigma() -> f64 {
        0.5
    }

    /// Clamp `eta` and `sigma` to their magnitudes. Negative inputs are
    /// sign-flipped, never rejected.
    pub fn normalized(mut self) -> Self {
        self.eta = self.eta.abs();
        self.sigma = self.sigma.abs();
        self
    }
}

impl Default for StructureParams {
    fn default() -> Self {
        Self {
            eta: Self::default_eta(),
            sigma: Self::default_sigma(),
            seed: None,
        }
    }
}

/// Parameters for the uniform-random baseline recommender.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RandomParams {
    /// RNG seed; `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Top-level recommendation settings, one section per strategy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RecommenderConfig {
    #[serde(default)]
    pub structure: StructureParams,
    #[serde(default)]
    pub random: RandomParams,
}

impl RecommenderConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}
