//! Parameters of a simulation run.

use std::fmt;

use crate::error::ConfigurationError;

/// Maximum number of jobs the system holds at once, in queue and in service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capacity {
    Bounded(usize),
    Unbounded,
}

impl Capacity {
    pub fn is_full (&self, jobs: usize) -> bool {
        match *self {
            Capacity::Bounded(n) => jobs >= n,
            Capacity::Unbounded => false,
        }
    }

    pub fn is_bounded (&self) -> bool {
        matches!(self, Capacity::Bounded(_))
    }
}

impl fmt::Display for Capacity {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Bounded(n) => write!(f, "{}", n),
            Capacity::Unbounded => write!(f, "inf"),
        }
    }
}

/// Configuration of one engine.
///
/// Times share a single unit (the presets read them as minutes).
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Expected inter-arrival time.
    pub ea: f64,

    /// Expected service time.
    pub es: f64,

    /// The run stops at the first event at or past this time.
    pub simulation_time: f64,

    pub server_count: usize,

    pub max_capacity: Capacity,
}

impl SimulationConfig {
    pub fn new (ea: f64, es: f64, simulation_time: f64) -> Self {
        Self {
            ea,
            es,
            simulation_time,
            server_count: 1,
            max_capacity: Capacity::Unbounded,
        }
    }

    /// Single server, unbounded queue.
    pub fn mm1 () -> Self {
        Self::default()
    }

    /// Single server holding at most `capacity` jobs.
    pub fn mm1n (capacity: usize) -> Self {
        Self::default().with_capacity(Capacity::Bounded(capacity))
    }

    pub fn mm2 () -> Self {
        Self::mmn(2)
    }

    /// `servers` parallel servers sharing one unbounded FIFO queue.
    pub fn mmn (servers: usize) -> Self {
        Self::default().with_servers(servers)
    }

    pub fn with_ea (mut self, ea: f64) -> Self {
        self.ea = ea;
        self
    }

    pub fn with_es (mut self, es: f64) -> Self {
        self.es = es;
        self
    }

    pub fn with_simulation_time (mut self, simulation_time: f64) -> Self {
        self.simulation_time = simulation_time;
        self
    }

    pub fn with_servers (mut self, server_count: usize) -> Self {
        self.server_count = server_count;
        self
    }

    pub fn with_capacity (mut self, max_capacity: Capacity) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Offered load per server, `es / (ea * servers)`.
    pub fn offered_load (&self) -> f64 {
        self.es / (self.ea * self.server_count as f64)
    }

    pub fn validate (&self) -> Result<(), ConfigurationError> {
        if !(self.ea > 0. && self.ea.is_finite()) {
            return Err(ConfigurationError::NonPositiveArrivalMean(self.ea));
        }
        if !(self.es > 0. && self.es.is_finite()) {
            return Err(ConfigurationError::NonPositiveServiceMean(self.es));
        }
        if !(self.simulation_time > 0. && self.simulation_time.is_finite()) {
            return Err(ConfigurationError::NonPositiveHorizon(self.simulation_time));
        }
        if self.server_count == 0 {
            return Err(ConfigurationError::NoServers);
        }
        if let Capacity::Bounded(capacity) = self.max_capacity {
            if capacity < self.server_count {
                return Err(ConfigurationError::CapacityBelowServers {
                    capacity,
                    servers: self.server_count,
                });
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default () -> Self {
        Self::new(4.3, 3.4, 1_000.)
    }
}
