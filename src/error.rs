use thiserror::Error;

/// Rejected parameters. An engine is never built from a config that fails
/// one of these checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("expected inter-arrival time must be positive and finite, got {0}")]
    NonPositiveArrivalMean(f64),

    #[error("expected service time must be positive and finite, got {0}")]
    NonPositiveServiceMean(f64),

    #[error("simulation time must be positive and finite, got {0}")]
    NonPositiveHorizon(f64),

    #[error("at least one server is required")]
    NoServers,

    #[error("capacity {capacity} is below the server count {servers}")]
    CapacityBelowServers { capacity: usize, servers: usize },

    #[error("scripted uniform source needs at least one value")]
    EmptyScript,

    #[error("uniform value {0} is outside (0, 1]")]
    UniformOutOfRange(f64),
}

/// Failures while advancing the clock or deriving statistics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    #[error("no event has advanced the clock past 0")]
    EmptyObservationWindow,

    #[error("residence time diverges at mean utilization {utilization}")]
    Saturated { utilization: f64 },

    #[error("uniform source produced an invalid draw: {value}")]
    InvalidDraw { value: f64 },

    #[error("clock stuck at {time} for {events} consecutive events")]
    Stalled { time: f64, events: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("computation error: {0}")]
    Computation(#[from] ComputationError),
}
