use queue_sim::{
    Capacity, ComputationError, ConstantDistribution, EventKind, RngUniform, SimulationConfig,
    Transition, MMKN,
};
use tracing_test::traced_test;

fn configs () -> Vec<SimulationConfig> {
    vec![
        SimulationConfig::mm1(),
        SimulationConfig::mm1n(3),
        SimulationConfig::mm2().with_ea(1.),
        SimulationConfig::mmn(4).with_ea(0.5).with_capacity(Capacity::Bounded(6)),
        // overloaded: the queue grows without bound
        SimulationConfig::mm1().with_ea(1.).with_es(2.),
    ]
}

fn capacity_of (config: &SimulationConfig) -> usize {
    match config.max_capacity {
        Capacity::Bounded(n) => n,
        Capacity::Unbounded => usize::MAX,
    }
}

#[test]
fn invariants_hold_after_every_event () {
    for (i, config) in configs().into_iter().enumerate() {
        let capacity = capacity_of(&config);
        let mut sim = MMKN::new(config, RngUniform::seeded(i as u64)).unwrap();
        let mut clock = 0.;
        let mut area = 0.;

        while !sim.is_finished() {
            let t = sim.step().unwrap();
            let state = sim.state();

            assert!(state.jobs_in_system() <= capacity);
            assert_eq!(t.jobs_in_system, state.jobs_in_system());
            assert!(t.time > clock, "clock went from {} to {}", clock, t.time);
            assert_eq!(state.clock(), t.time);
            assert!(state.area_under_jobs_curve() >= area);
            assert_eq!(
                state.total_arrivals(),
                state.rejected_arrivals() + state.accepted_arrivals()
            );
            assert!(state.completed_jobs() <= state.accepted_arrivals());
            assert_eq!(
                state.completed_jobs() + state.jobs_in_system() as u64,
                state.accepted_arrivals()
            );

            // a slot is scheduled exactly when its server holds a job
            let in_service = state.jobs_in_system().min(state.server_count());
            assert_eq!(state.busy_servers(), in_service);
            for server in 0..state.server_count() {
                if let Some(d) = state.next_departure(server) {
                    assert!(d >= state.clock());
                }
            }

            clock = t.time;
            area = state.area_under_jobs_curve();
        }
        assert!(sim.state().clock() >= sim.config().simulation_time);
    }
}

#[test]
fn deterministic_single_server_trace () {
    let config = SimulationConfig::new(2., 1., 10.).with_capacity(Capacity::Bounded(1));
    let mut sim = MMKN::new(config, ConstantDistribution::new()).unwrap();

    let mut trace = Vec::new();
    while !sim.is_finished() {
        trace.push(sim.step().unwrap());
    }

    let arrival = |time| Transition { time, kind: EventKind::Arrival { server: Some(0) }, jobs_in_system: 1 };
    let departure = |time| Transition { time, kind: EventKind::Departure { server: 0 }, jobs_in_system: 0 };
    assert_eq!(trace, vec![
        arrival(2.), departure(3.),
        arrival(4.), departure(5.),
        arrival(6.), departure(7.),
        arrival(8.), departure(9.),
        arrival(10.),
    ]);

    let state = sim.state();
    assert_eq!(state.clock(), 10.);
    assert_eq!(state.completed_jobs(), 4);
    assert_eq!(state.rejected_arrivals(), 0);
    assert_eq!(state.total_arrivals(), 5);
    assert_eq!(state.jobs_in_system(), 1);
    assert_eq!(state.next_arrival(), 12.);
    assert_eq!(state.next_departure(0), Some(11.));
    assert_eq!(state.area_under_jobs_curve(), 4.);
    // busy time counts the service already scheduled past the horizon
    assert_eq!(state.busy_time(), &[5.]);

    let stats = sim.statistics().unwrap();
    assert_eq!(stats.avg_jobs_in_system, 0.4);
    assert_eq!(stats.utilization, vec![0.5]);
    assert_eq!(stats.throughput, 0.4);
    assert_eq!(stats.rejection_probability, Some(0.));
    assert_eq!(stats.residence_time(), Ok(2.));
}

#[test]
fn statistics_before_any_event_is_an_error () {
    let sim = MMKN::new(SimulationConfig::default(), RngUniform::seeded(0)).unwrap();
    assert_eq!(sim.statistics(), Err(ComputationError::EmptyObservationWindow));
}

#[test]
fn statistics_are_idempotent () {
    let mut sim = MMKN::new(SimulationConfig::mm1n(4), RngUniform::seeded(5)).unwrap();
    sim.run().unwrap();
    let first = sim.statistics().unwrap();
    let second = sim.statistics().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn completed_matches_accepted_after_drain () {
    let config = SimulationConfig::mmn(3).with_ea(1.).with_es(2.5).with_capacity(Capacity::Bounded(5));
    let mut sim = MMKN::new(config, RngUniform::seeded(21)).unwrap();
    sim.run().unwrap();
    sim.drain().unwrap();

    let state = sim.state();
    assert_eq!(state.jobs_in_system(), 0);
    assert_eq!(state.completed_jobs(), state.accepted_arrivals());
    assert!(state.rejected_arrivals() > 0);
}

#[test]
fn heavy_load_on_single_slot_rejects_most_arrivals () {
    let config = SimulationConfig::new(0.1, 10., 100_000.).with_capacity(Capacity::Bounded(1));
    let mut sim = MMKN::new(config, RngUniform::seeded(2024)).unwrap();
    sim.run().unwrap();

    let p = sim.statistics().unwrap().rejection_probability.unwrap();
    assert!(p > 0.8 && p < 1., "rejection probability {}", p);
}

#[test]
fn adding_servers_does_not_hurt () {
    // one server is overloaded at ea = 1, es = 2; three are not
    let base = SimulationConfig::new(1., 2., 20_000.);
    let seed = 77;

    let mut single = MMKN::new(base.clone(), RngUniform::seeded(seed)).unwrap();
    single.run().unwrap();
    let single = single.statistics().unwrap();

    let mut multi = MMKN::new(base.with_servers(3), RngUniform::seeded(seed)).unwrap();
    multi.run().unwrap();
    let multi = multi.statistics().unwrap();

    assert_eq!(single.rejection_probability, None);
    assert_eq!(multi.rejection_probability, None);
    assert!(multi.throughput >= single.throughput);
    assert!(multi.avg_jobs_in_system < single.avg_jobs_in_system);
}

#[test]
fn mm1_matches_queueing_theory () {
    // rho = 0.5: L = 1, U = 0.5, X = 1 / ea
    let config = SimulationConfig::new(2., 1., 200_000.);
    let mut sim = MMKN::new(config, RngUniform::seeded(9)).unwrap();
    sim.run().unwrap();
    let stats = sim.statistics().unwrap();

    assert!((stats.mean_utilization - 0.5).abs() < 0.02, "{}", stats.mean_utilization);
    assert!((stats.avg_jobs_in_system - 1.).abs() < 0.1, "{}", stats.avg_jobs_in_system);
    assert!((stats.throughput - 0.5).abs() < 0.02, "{}", stats.throughput);
    assert!((stats.residence_time().unwrap() - 2.).abs() < 0.2);
}

#[test]
fn mm1n_rejection_matches_queueing_theory () {
    // rho = 1, N = 3: every state equally likely, P(full) = 1 / 4
    let config = SimulationConfig::new(1., 1., 200_000.).with_capacity(Capacity::Bounded(3));
    let mut sim = MMKN::new(config, RngUniform::seeded(13)).unwrap();
    sim.run().unwrap();
    let p = sim.statistics().unwrap().rejection_probability.unwrap();
    assert!((p - 0.25).abs() < 0.02, "rejection probability {}", p);
}

#[test]
fn overloaded_server_reports_divergent_residence_time () {
    // service 3 against arrivals every 1: busy time outruns the clock
    let mut sim = MMKN::new(SimulationConfig::new(1., 3., 10.), ConstantDistribution::new()).unwrap();
    sim.run().unwrap();
    let stats = sim.statistics().unwrap();
    assert_eq!(stats.observation_window, 10.);
    assert_eq!(stats.utilization, vec![1.2]);
    assert_eq!(stats.residence_time(), Err(ComputationError::Saturated { utilization: 1.2 }));
}

#[traced_test]
#[test]
fn run_logs_summary () {
    let mut sim = MMKN::new(SimulationConfig::mm2(), RngUniform::seeded(1)).unwrap();
    sim.run().unwrap();
    assert!(logs_contain("Simulation finished"));
}
