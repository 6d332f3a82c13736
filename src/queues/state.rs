use ordered_float::NotNan;

/// Mutable state of a single run. Owned by exactly one engine.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub(crate) clock: f64,
    pub(crate) next_arrival: f64,
    // None while the server is idle
    pub(crate) next_departure: Vec<Option<NotNan<f64>>>,
    pub(crate) jobs_in_system: usize,
    pub(crate) busy_time: Vec<f64>,
    pub(crate) area_under_jobs_curve: f64,
    pub(crate) completed_jobs: u64,
    pub(crate) total_arrivals: u64,
    pub(crate) rejected_arrivals: u64,
}

impl SimulationState {
    pub(crate) fn new (server_count: usize, first_arrival: f64) -> Self {
        SimulationState {
            clock: 0.,
            next_arrival: first_arrival,
            next_departure: vec![None; server_count],
            jobs_in_system: 0,
            busy_time: vec![0.; server_count],
            area_under_jobs_curve: 0.,
            completed_jobs: 0,
            total_arrivals: 0,
            rejected_arrivals: 0,
        }
    }

    //Integrates the job count up to 'time' and moves the clock there
    pub(crate) fn advance_to (&mut self, time: f64) {
        self.area_under_jobs_curve += (time - self.clock) * self.jobs_in_system as f64;
        self.clock = time;
    }

    /// Earliest scheduled departure, lowest server index on ties.
    pub fn earliest_departure (&self) -> Option<(f64, usize)> {
        self.next_departure.iter()
            .enumerate()
            .filter_map(|(server, d)| d.map(|t| (t, server)))
            .min()
            .map(|(t, server)| (t.into_inner(), server))
    }

    pub fn idle_server (&self) -> Option<usize> {
        self.next_departure.iter().position(|d| d.is_none())
    }

    pub fn busy_servers (&self) -> usize {
        self.next_departure.iter().filter(|d| d.is_some()).count()
    }

    /// Jobs present but not in service.
    pub fn waiting_jobs (&self) -> usize {
        self.jobs_in_system - self.busy_servers()
    }

    pub fn clock (&self) -> f64 {
        self.clock
    }

    pub fn next_arrival (&self) -> f64 {
        self.next_arrival
    }

    pub fn next_departure (&self, server: usize) -> Option<f64> {
        self.next_departure[server].map(NotNan::into_inner)
    }

    pub fn jobs_in_system (&self) -> usize {
        self.jobs_in_system
    }

    pub fn busy_time (&self) -> &[f64] {
        &self.busy_time
    }

    pub fn area_under_jobs_curve (&self) -> f64 {
        self.area_under_jobs_curve
    }

    pub fn completed_jobs (&self) -> u64 {
        self.completed_jobs
    }

    pub fn total_arrivals (&self) -> u64 {
        self.total_arrivals
    }

    pub fn rejected_arrivals (&self) -> u64 {
        self.rejected_arrivals
    }

    pub fn accepted_arrivals (&self) -> u64 {
        self.total_arrivals - self.rejected_arrivals
    }

    pub fn server_count (&self) -> usize {
        self.next_departure.len()
    }
}
