use anyhow::Context;
use clap::{Parser, Subcommand};
use pupil_tracker::geometry::SurfaceRect;
use pupil_tracker::replay::process_trace_file;
use pupil_tracker::TrackerConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pupil-tracker", version, about = "Ellipse-constrained pointer followers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a recorded pointer trace and write per-frame tracker positions
    Replay {
        /// JSON array of {x, y, processTimeMs} samples
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Tracker config JSON; the two-eye default when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Use the single snapping follower preset
        #[arg(long, conflicts_with = "config")]
        single: bool,
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 720.0)]
        height: f64,
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
    },
    /// Print the default tracker config as JSON
    DefaultConfig,
}

fn main() -> anyhow::Result<()> {
    pupil_tracker::init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay {
            input,
            output,
            config,
            single,
            width,
            height,
            fps,
        } => {
            let config = match config {
                Some(path) => TrackerConfig::from_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None if single => TrackerConfig::single_follower(),
                None => TrackerConfig::default(),
            };
            let surface = SurfaceRect::new(0.0, 0.0, width, height);
            process_trace_file(&input, &output, &config, surface, fps)?;
        }
        Command::DefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&TrackerConfig::default())?);
        }
    }

    Ok(())
}
