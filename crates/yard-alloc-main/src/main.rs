// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod config;
mod sim;

use clap::Parser;
use config::SimulationConfigBuilder;
use sim::Simulation;
use std::{
    error::Error,
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};
use yard_alloc_engine::prelude::*;
use yard_alloc_model::prelude::*;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Parser, Debug)]
#[command(name = "yard-alloc")]
#[command(about = "Runs a seeded gate simulation against a container yard layout")]
struct Cli {
    /// Yard layout document (JSON)
    #[arg(long, default_value = "crates/yard-alloc-main/data/yard.json")]
    layout: PathBuf,

    /// Engine configuration (JSON). Defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Containers arriving in the first wave
    #[arg(long, default_value_t = 200)]
    containers: usize,

    /// Share of placed containers picked up before the second wave
    #[arg(long, default_value_t = 0.3)]
    pickup_ratio: f64,

    /// Seed for arrivals and pickups. Random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the JSON report
    #[arg(long, default_value = "yard_report.json")]
    report: PathBuf,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();
    let cli = Cli::parse();

    let layout: YardLayout = read_json(&cli.layout)?;
    let engine_config = match &cli.config {
        Some(path) => read_json(path)?,
        None => EngineConfig::default(),
    };
    info!(
        layout = %cli.layout.display(),
        yards = layout.yards().len(),
        capacity = layout.capacity(),
        max_conflict_retries = engine_config.max_conflict_retries,
        "Layout loaded"
    );

    let store = MemoryYardStore::from_layout(&layout)?;
    let engine = YardEngine::new(store).with_config(engine_config);

    let builder = SimulationConfigBuilder::new()
        .containers(cli.containers)
        .pickup_ratio(cli.pickup_ratio);
    let builder = match cli.seed {
        Some(seed) => builder.seed(seed),
        None => builder.random_seed(),
    };
    let sim_config = builder.build()?;

    let report = Simulation::new(&engine, &layout, sim_config).run()?;

    let writer = BufWriter::new(File::create(&cli.report)?);
    serde_json::to_writer_pretty(writer, &report)?;
    info!(
        report = %cli.report.display(),
        seed = report.seed,
        active = report.active_at_end,
        utilization = report.utilization,
        elapsed_ms = report.elapsed_ms,
        "Report written"
    );

    if !report.is_consistent() {
        error!(violations = report.violations.len(), "Occupancy audit failed");
        return Err(format!("{} occupancy violations", report.violations.len()).into());
    }
    Ok(())
}
