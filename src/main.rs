use std::env;
use std::error::Error;

use tracing_subscriber::EnvFilter;

use queue_sim::{Capacity, RngUniform, SimulationConfig, MMKN};

const USAGE: &str = "usage: queue_sim [mm1|mm1n|mm2|mmn] [ea] [es] [time] [capacity|servers|-] [seed]
  the fifth argument is the capacity for mm1n, the server count for mmn,
  and must be '-' for mm1 and mm2";

fn parse<T> (arg: Option<&String>, name: &str, default: T) -> Result<T, String>
    where T: std::str::FromStr
{
    match arg {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| format!("invalid {}: {}\n{}", name, s, USAGE)),
    }
}

fn config_from_args (args: &[String]) -> Result<(SimulationConfig, Option<u64>), String> {
    let model = args.first().map(String::as_str).unwrap_or("mm1");
    let fixed_layout = |config: SimulationConfig| match args.get(4).map(String::as_str) {
        None | Some("-") => Ok(config),
        Some(s) => Err(format!("{} takes no capacity or server count, got {}\n{}", model, s, USAGE)),
    };
    let base = match model {
        "mm1" => fixed_layout(SimulationConfig::mm1())?,
        "mm1n" => SimulationConfig::mm1n(parse(args.get(4), "capacity", 8)?),
        "mm2" => fixed_layout(SimulationConfig::mm2())?,
        "mmn" => SimulationConfig::mmn(parse(args.get(4), "servers", 2)?),
        other => return Err(format!("unknown model: {}\n{}", other, USAGE)),
    };

    let config = base
        .with_ea(parse(args.get(1), "ea", 1. / 30.)?)
        .with_es(parse(args.get(2), "es", 1. / 1000.)?)
        .with_simulation_time(parse(args.get(3), "time", 100_000.)?);
    let seed = args.get(5)
        .map(|s| s.parse::<u64>().map_err(|_| format!("invalid seed: {}\n{}", s, USAGE)))
        .transpose()?;
    Ok((config, seed))
}

fn main () -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (config, seed) = config_from_args(&args)?;
    let source = match seed {
        Some(seed) => RngUniform::seeded(seed),
        None => RngUniform::from_entropy(),
    };

    let mut sim = MMKN::new(config, source)?;
    sim.run()?;
    let stats = sim.statistics()?;

    let config = sim.config();
    let capacity = match config.max_capacity {
        Capacity::Bounded(n) => format!("/{}", n),
        Capacity::Unbounded => String::new(),
    };
    println!("M/M/{}{} ea={} es={} time={}", config.server_count, capacity, config.ea, config.es, config.simulation_time);
    println!("{}", stats);
    Ok(())
}
