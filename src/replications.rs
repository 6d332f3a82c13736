//! Independent replications of one configuration.
//!
//! Replication `i` owns a ChaCha8 generator seeded with `base_seed + i`, so
//! runs share no generator state and the output only depends on
//! `(config, base_seed, count)`, whatever the thread count.

use rayon::prelude::*;
use tracing::info;

use crate::config::SimulationConfig;
use crate::distribution::RngUniform;
use crate::error::SimulationError;
use crate::queues::mmkn::MMKN;
use crate::queues::statistics::Statistics;

pub fn run_replication (config: &SimulationConfig, seed: u64) -> Result<Statistics, SimulationError> {
    let mut sim = MMKN::new(config.clone(), RngUniform::seeded(seed))?;
    sim.run()?;
    Ok(sim.statistics()?)
}

/// Results come back in seed order.
pub fn run_replications (
    config: &SimulationConfig,
    base_seed: u64,
    count: usize,
) -> Result<Vec<Statistics>, SimulationError> {
    config.validate()?;

    let results = (0..count as u64)
        .into_par_iter()
        .map(|i| run_replication(config, base_seed.wrapping_add(i)))
        .collect::<Result<Vec<_>, _>>()?;

    info!(count, base_seed, "Replications finished");
    Ok(results)
}
