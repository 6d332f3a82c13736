use std::fmt;

use statistical::mean;

use crate::config::SimulationConfig;
use crate::error::ComputationError;
use crate::queues::state::SimulationState;

/// Time-averaged results of a run, observed over `[0, clock]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Statistics {
    pub observation_window: f64,
    pub avg_jobs_in_system: f64,
    /// Busy fraction of each server.
    pub utilization: Vec<f64>,
    pub mean_utilization: f64,
    pub throughput: f64,
    /// `None` when capacity is unbounded, since nothing is ever rejected.
    pub rejection_probability: Option<f64>,
    pub completed_jobs: u64,
    pub total_arrivals: u64,
    pub rejected_arrivals: u64,
    expected_service_time: f64,
}

impl Statistics {
    pub fn from_state (state: &SimulationState, config: &SimulationConfig) -> Result<Self, ComputationError> {
        let clock = state.clock();
        if clock <= 0. {
            return Err(ComputationError::EmptyObservationWindow);
        }

        let utilization: Vec<f64> = state.busy_time().iter().map(|b| b / clock).collect();
        let mean_utilization = mean(&utilization);

        // clock > 0 implies at least one arrival was processed
        let rejection_probability = if config.max_capacity.is_bounded() {
            Some(state.rejected_arrivals() as f64 / state.total_arrivals() as f64)
        }
        else {
            None
        };

        Ok(Statistics {
            observation_window: clock,
            avg_jobs_in_system: state.area_under_jobs_curve() / clock,
            utilization,
            mean_utilization,
            throughput: state.completed_jobs() as f64 / clock,
            rejection_probability,
            completed_jobs: state.completed_jobs(),
            total_arrivals: state.total_arrivals(),
            rejected_arrivals: state.rejected_arrivals(),
            expected_service_time: config.es,
        })
    }

    /// Expected time in system, `es / (1 - U)` with `U` the mean utilization.
    pub fn residence_time (&self) -> Result<f64, ComputationError> {
        if self.mean_utilization >= 1. {
            Err(ComputationError::Saturated { utilization: self.mean_utilization })
        }
        else {
            Ok(self.expected_service_time / (1. - self.mean_utilization))
        }
    }

    pub fn total_utilization (&self) -> f64 {
        self.utilization.iter().sum()
    }
}

impl fmt::Display for Statistics {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average No. Jobs: {}", self.avg_jobs_in_system)?;
        if self.utilization.len() > 1 {
            writeln!(f, "Utilization: {} (per server: {:?})", self.mean_utilization, self.utilization)?;
        }
        else {
            writeln!(f, "Utilization: {}", self.mean_utilization)?;
        }
        match self.residence_time() {
            Ok(r) => writeln!(f, "Residence Time: {}", r)?,
            Err(_) => writeln!(f, "Residence Time: diverges")?,
        }
        write!(f, "Throughput: {}", self.throughput)?;
        if let Some(p) = self.rejection_probability {
            write!(f, "\nProbability of Rejection: {}", p)?;
        }
        Ok(())
    }
}
