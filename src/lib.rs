//! Discrete-event simulation of M/M/1, M/M/1/N, M/M/c and M/M/N queues.
//!
//! A single engine, [`MMKN`], covers every variant: the server count and the
//! system capacity are parameters of [`SimulationConfig`]. Inter-arrival and
//! service times are exponential, drawn by inverse transform from an injected
//! [`UniformSource`].

pub mod config;
pub mod distribution;
pub mod error;
pub mod queues;
pub mod replications;

pub use config::{Capacity, SimulationConfig};
pub use distribution::{ConstantDistribution, RngUniform, ScriptedUniform, UniformSource};
pub use error::{ComputationError, ConfigurationError, SimulationError};
pub use queues::mmkn::MMKN;
pub use queues::state::SimulationState;
pub use queues::statistics::Statistics;
pub use queues::{EventKind, Transition};
pub use replications::{run_replication, run_replications};
