//! `pace run`: simulate a timed workload and track it.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use pace_core::estimate::Weighting;
use pace_core::stopwatch::Stopwatch;
use pace_core::tracker::Progress;

/// Drive a tracker through a simulated workload: per measurement interval,
/// sleep once for each task in the batch, then record the batch.
pub fn run_demo(
    tasks: u64,
    sleep_ms: u64,
    batch: u64,
    interval: f64,
    print_remaining: bool,
    weighting: Weighting,
) -> Result<()> {
    anyhow::ensure!(batch > 0, "batch size must be positive");
    anyhow::ensure!(
        tasks > 0 && tasks % batch == 0,
        "task count must be a positive multiple of the batch size"
    );

    let mut tracker = Progress::with_options(tasks, interval, print_remaining, weighting)?;
    let mut watch = Stopwatch::started();

    for _ in 0..tasks / batch {
        tracker.begin();
        for _ in 0..batch {
            thread::sleep(Duration::from_millis(sleep_ms));
        }
        tracker.record(batch)?;
    }

    tracker.report()?;
    watch.stop();
    tracing::info!("simulated {} tasks in {}", tasks, watch);
    Ok(())
}
