use ordered_float::NotNan;
use tracing::{debug, info, trace};

use crate::config::SimulationConfig;
use crate::distribution::UniformSource;
use crate::error::{ComputationError, ConfigurationError};
use crate::queues::state::SimulationState;
use crate::queues::statistics::Statistics;
use crate::queues::{EventKind, Transition};

/// M/M/k/N engine: `k` servers fed from one FIFO queue, at most `N` jobs in
/// the system. `N` may be unbounded and `k` may be 1, which covers M/M/1,
/// M/M/1/N, M/M/c and M/M/N.
///
/// On an exact tie between the next arrival and the earliest departure, the
/// departure is processed first.
pub struct MMKN<U> where U: UniformSource {
    config: SimulationConfig,
    state: SimulationState,
    source: U,
    // consecutive events that left the clock where it was
    stalled_events: usize,
}

impl<U> MMKN<U> where U: UniformSource {
    pub fn new (config: SimulationConfig, mut source: U) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let first_arrival = source.next_exponential(config.ea);
        debug!(
            ea = config.ea,
            es = config.es,
            servers = config.server_count,
            capacity = %config.max_capacity,
            load = config.offered_load(),
            first_arrival,
            "Created simulation"
        );

        Ok(MMKN {
            state: SimulationState::new(config.server_count, first_arrival),
            config,
            source,
            stalled_events: 0,
        })
    }

    pub fn config (&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state (&self) -> &SimulationState {
        &self.state
    }

    pub fn is_finished (&self) -> bool {
        self.state.clock >= self.config.simulation_time
    }

    fn draw (&mut self, mean: f64) -> Result<f64, ComputationError> {
        let value = self.source.next_exponential(mean);
        if value >= 0. && value.is_finite() {
            Ok(value)
        }
        else {
            Err(ComputationError::InvalidDraw { value })
        }
    }

    //Puts a job into service on 'server', starting now
    fn start_service (&mut self, server: usize) -> Result<(), ComputationError> {
        let service = self.draw(self.config.es)?;
        let departure = NotNan::new(self.state.clock + service)
            .map_err(|_| ComputationError::InvalidDraw { value: service })?;

        self.state.busy_time[server] += service;
        self.state.next_departure[server] = Some(departure);
        Ok(())
    }

    fn schedule_arrival (&mut self) -> Result<(), ComputationError> {
        self.state.next_arrival = self.state.clock + self.draw(self.config.ea)?;
        Ok(())
    }

    // One instant holds at most a departure per server and an arrival when
    // draws are positive. Twice that means zero draws are pinning the clock.
    fn stall_limit (&self) -> usize {
        2 * self.config.server_count + 2
    }

    /// Processes exactly one event and returns it.
    ///
    /// Fails with `Stalled` when the source keeps drawing zero durations and
    /// the clock can no longer reach the simulation time.
    pub fn step (&mut self) -> Result<Transition, ComputationError> {
        let start = self.state.clock;
        let transition = match self.state.earliest_departure() {
            Some((t, server)) if t <= self.state.next_arrival => self.departure(t, server)?,
            _ => self.arrival()?,
        };

        if self.state.clock > start {
            self.stalled_events = 0;
        }
        else {
            self.stalled_events += 1;
            if self.stalled_events > self.stall_limit() {
                return Err(ComputationError::Stalled { time: start, events: self.stalled_events });
            }
        }
        Ok(transition)
    }

    fn arrival (&mut self) -> Result<Transition, ComputationError> {
        let time = self.state.next_arrival;
        self.state.total_arrivals += 1;
        self.state.advance_to(time);

        let kind = if self.config.max_capacity.is_full(self.state.jobs_in_system) {
            self.state.rejected_arrivals += 1;
            self.schedule_arrival()?;
            EventKind::Rejection
        }
        else {
            self.state.jobs_in_system += 1;
            self.schedule_arrival()?;

            let server = self.state.idle_server();
            if let Some(server) = server {
                self.start_service(server)?;
            }
            EventKind::Arrival { server }
        };

        trace!(time, ?kind, jobs = self.state.jobs_in_system, "Arrival");
        Ok(Transition { time, kind, jobs_in_system: self.state.jobs_in_system })
    }

    fn departure (&mut self, time: f64, server: usize) -> Result<Transition, ComputationError> {
        self.state.advance_to(time);
        self.state.jobs_in_system -= 1;
        self.state.completed_jobs += 1;
        self.state.next_departure[server] = None;

        // the freed server picks up the head of the queue, if any
        if self.state.waiting_jobs() > 0 {
            self.start_service(server)?;
        }

        trace!(time, server, jobs = self.state.jobs_in_system, "Departure");
        Ok(Transition {
            time,
            kind: EventKind::Departure { server },
            jobs_in_system: self.state.jobs_in_system,
        })
    }

    /// Advances until the clock reaches the simulation time.
    pub fn run (&mut self) -> Result<(), ComputationError> {
        while !self.is_finished() {
            self.step()?;
        }
        info!(
            clock = self.state.clock,
            arrivals = self.state.total_arrivals,
            rejected = self.state.rejected_arrivals,
            completed = self.state.completed_jobs,
            jobs = self.state.jobs_in_system,
            "Simulation finished"
        );
        Ok(())
    }

    /// Serves every job still in the system without admitting new arrivals.
    /// The clock moves past the simulation time.
    pub fn drain (&mut self) -> Result<(), ComputationError> {
        while let Some((t, server)) = self.state.earliest_departure() {
            self.departure(t, server)?;
        }
        debug!(clock = self.state.clock, completed = self.state.completed_jobs, "Drained");
        Ok(())
    }

    pub fn statistics (&self) -> Result<Statistics, ComputationError> {
        Statistics::from_state(&self.state, &self.config)
    }
}
