use anyhow::Context;
use clap::Parser;
use gui_bridge::bridge::GuiBridge;
use gui_bridge::model::FrameModel;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::SimulationConfig;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline driver for the marine radar simulation core")]
struct Args {
    /// Run the configured scenario once and emit a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a simulation config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 600)]
    ticks: usize,
    #[arg(long, default_value_t = 0.1)]
    tick_seconds: f64,
    /// Keep the GUI bridge alive for incoming scenario posts
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let simulation_config = if let Some(path) = args.config {
        SimulationConfig::load(path)?
    } else {
        SimulationConfig::from_args(args.ticks, args.tick_seconds)
    };

    let runner = Runner::new(simulation_config.clone());
    let gui_bridge = GuiBridge::new(Arc::new(runner.clone()));

    if args.offline {
        let result = runner.execute()?;

        println!(
            "Offline run -> rotations {}, contacts {} (spawned {}, pruned {})",
            result.metrics.rotations_completed,
            result.contacts.len(),
            result.metrics.contacts_spawned,
            result.metrics.contacts_pruned
        );

        let model = FrameModel::from_result(&simulation_config.scenario.name, &result);
        gui_bridge.publish(&model)?;
        gui_bridge.publish_status("Offline scenario results ready.");

        let report = format!(
            "scenario={} ticks={} rotations={} contacts={} spawned={} pruned={}\n",
            simulation_config.scenario.name,
            result.ticks_run,
            result.metrics.rotations_completed,
            result.contacts.len(),
            result.metrics.contacts_spawned,
            result.metrics.contacts_pruned
        );
        let report_path = PathBuf::from("tools/data/offline_radar.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }
    if args.serve {
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
