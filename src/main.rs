use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use aging_sched::{
    config::Config,
    input::read_processes,
    report::TextReport,
    sim::{Sim, SimReport, bernoulli_processes},
};
use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let cfg_path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = Config::load(cfg_path)?;
    info!("starting aging-sched with config {:?}", cfg);

    let processes = match &cfg.synthetic {
        Some(params) => bernoulli_processes(params)?,
        None => read_processes(&cfg.input_path)
            .with_context(|| format!("loading {}", cfg.input_path.display()))?,
    };
    info!(processes = processes.len(), "process list loaded");

    let sim = Sim::new(processes, cfg.sim_config())?;
    let report = match &cfg.output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            run(sim, BufWriter::new(file))?
        }
        None => run(sim, io::stdout().lock())?,
    };

    let summary = &report.summary;
    info!(
        "finished at time {}, average wait {:.2} ticks, average turnaround {:.2} ticks, average response {:.2} ticks",
        summary.finished_at, summary.average_wait, summary.mean_turnaround, summary.mean_response
    );
    Ok(())
}

fn run<W: Write>(sim: Sim, out: W) -> Result<SimReport> {
    let mut trace = TextReport::new(out);
    let report = sim.run(&mut trace)?;
    trace.finish().context("writing execution trace")?;
    Ok(report)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
