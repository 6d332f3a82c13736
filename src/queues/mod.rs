pub mod state;
pub mod mmkn;
pub mod statistics;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Accepted arrival. `server` is set when the job went straight into service.
    Arrival { server: Option<usize> },
    /// Arrival turned away because the system was at capacity.
    Rejection,
    Departure { server: usize },
}

/// One processed event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub time: f64,
    pub kind: EventKind,
    /// Count after the event was applied.
    pub jobs_in_system: usize,
}
