use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::ConfigurationError;

/// Source of uniform samples on (0, 1].
///
/// The engine owns one of these and draws every inter-arrival and service
/// time from it, so two engines never share generator state.
pub trait UniformSource {
    fn next_uniform (&mut self) -> f64;

    /// Exponential sample with the given mean, by inverse transform.
    fn next_exponential (&mut self, mean: f64) -> f64 {
        -mean * self.next_uniform().ln()
    }
}

/// Adapts any `rand` generator.
pub struct RngUniform<R> where R: Rng {
    rng: R
}

impl<R> RngUniform<R> where R: Rng {
    pub fn new (rng: R) -> Self {
        RngUniform { rng }
    }
}

impl RngUniform<ChaCha8Rng> {
    pub fn seeded (seed: u64) -> Self {
        RngUniform::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy () -> Self {
        RngUniform::new(ChaCha8Rng::from_entropy())
    }
}

impl<R> UniformSource for RngUniform<R> where R: Rng {
    fn next_uniform (&mut self) -> f64 {
        // gen::<f64>() is on [0, 1); flip it so ln() never sees 0
        1. - self.rng.gen::<f64>()
    }
}

/// Every draw returns exactly its mean, turning M/M/c into D/D/c.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantDistribution;

impl ConstantDistribution {
    pub fn new () -> Self { ConstantDistribution }
}

impl UniformSource for ConstantDistribution {
    fn next_uniform (&mut self) -> f64 {
        (-1f64).exp()
    }

    fn next_exponential (&mut self, mean: f64) -> f64 {
        mean
    }
}

/// Replays a fixed list of uniforms, cycling when exhausted.
///
/// Every value must lie in (0, 1]. A script made only of 1s draws zero
/// durations and stalls the clock, which the engine reports as an error.
#[derive(Clone, Debug)]
pub struct ScriptedUniform {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedUniform {
    pub fn new (values: Vec<f64>) -> Result<Self, ConfigurationError> {
        if values.is_empty() {
            return Err(ConfigurationError::EmptyScript);
        }
        if let Some(&u) = values.iter().find(|&&u| !(u > 0. && u <= 1.)) {
            return Err(ConfigurationError::UniformOutOfRange(u));
        }
        Ok(ScriptedUniform { values, next: 0 })
    }
}

impl UniformSource for ScriptedUniform {
    fn next_uniform (&mut self) -> f64 {
        let u = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        u
    }
}
