//! CLI for the Pace progress tracker.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pace_core::config;
use pace_core::estimate::Weighting;

use commands::{run_demo, run_fmt};

/// Top-level CLI for the Pace progress tracker.
#[derive(Debug, Parser)]
#[command(name = "pace")]
#[command(about = "Pace: task progress tracking with remaining-time estimates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Simulate a timed workload and track its progress.
    Run {
        /// Total number of tasks to simulate.
        #[arg(long, default_value = "100", value_name = "N")]
        tasks: u64,

        /// Sleep per task in milliseconds.
        #[arg(long, default_value = "10", value_name = "MS")]
        sleep_ms: u64,

        /// Tasks recorded per measurement interval. Must divide the task count.
        #[arg(long, default_value = "1", value_name = "B")]
        batch: u64,

        /// Progress fraction between printed lines, in [0, 1]; 0 disables
        /// printing. Defaults to the config-file value.
        #[arg(long, value_name = "F")]
        interval: Option<f64>,

        /// Do not append remaining-time estimates to progress lines.
        #[arg(long)]
        no_remaining: bool,

        /// Estimate weighting: "none" or "linear". Defaults to the
        /// config-file value.
        #[arg(long, value_name = "W")]
        weighting: Option<Weighting>,
    },

    /// Format a duration in seconds using the tracker's textual layout.
    Fmt {
        /// Duration in seconds.
        seconds: f64,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                tasks,
                sleep_ms,
                batch,
                interval,
                no_remaining,
                weighting,
            } => {
                let interval = interval.unwrap_or(cfg.print_interval);
                let print_remaining = !no_remaining && cfg.print_remaining;
                let weighting = weighting.unwrap_or(cfg.weighting);
                run_demo(tasks, sleep_ms, batch, interval, print_remaining, weighting)?;
            }
            CliCommand::Fmt { seconds } => run_fmt(seconds),
        }

        Ok(())
    }
}
