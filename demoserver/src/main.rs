use anyhow::Context;
use clap::Parser;
use config::DemoConfig;
use routes::DemoBridge;
use shieldcore::mock;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

mod config;
mod routes;

#[derive(Parser)]
#[command(author, version, about = "Stand-in VisionShield backend serving demo data")]
struct Args {
    /// Generate one demo dataset and append a summary line without serving
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a demo config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 7)]
    seed: u64,
    #[arg(long, default_value_t = 9000)]
    port: u16,
    /// Keep the HTTP bridge alive for the viewer
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let demo_config = if let Some(path) = args.config {
        DemoConfig::load(path)?
    } else {
        DemoConfig::from_args(args.seed, args.port)
    };

    let bridge = DemoBridge::new(demo_config.clone());

    if args.offline {
        let result = mock::mock_result("offline_demo");
        let history = mock::demo_history_with(
            demo_config.seed,
            demo_config.history_entries,
            result.timestamp,
        );

        println!(
            "Offline demo -> prediction {}, {} frames, {} history entries",
            result.prediction.label(),
            result.frame_analysis.len(),
            history.len()
        );

        bridge.publish_history(history.clone());
        bridge.publish_status("Offline demo dataset ready.");

        let summary = serde_json::json!({
            "prediction": result.prediction.label(),
            "confidence": result.confidence,
            "suspicious_frames": shieldcore::analysis::suspicious_count(&result.frame_analysis),
            "history_entries": history.len(),
            "seed": demo_config.seed,
        });
        let report_path = PathBuf::from("data/offline_demo.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        writeln!(file, "{summary}")?;
    }

    if args.serve {
        bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
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
