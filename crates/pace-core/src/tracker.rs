//! Interval-based progress tracking with remaining-time estimates.
//!
//! Usage per measurement interval: `begin()`, do the work, `record(n)` with
//! the number of tasks finished in that interval. `record` appends one
//! timing sample per task and prints a status line whenever cumulative
//! progress crosses the next print threshold. A final `report()` summarizes
//! total and average time.

use std::io::{self, Write};

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::estimate::{self, Weighting};
use crate::format::format_duration;

/// Per-task timing appended by one `record()` call.
///
/// `task_share` is the time since `begin()` split evenly across the batch;
/// `since_start_share` is the time since the previous recording point, which
/// also counts overhead spent outside begin/record windows. Pairing them in
/// one sequence keeps the two histories in lockstep by construction.
#[derive(Debug, Clone, Copy)]
struct Sample {
    task_share: f64,
    since_start_share: f64,
}

/// Progress tracker for a single job of a known number of fungible tasks.
///
/// Tracks exactly one job from zero to completion; there is no reset. Not
/// synchronized; callers using it from several threads must serialize access
/// themselves.
pub struct Progress<C: Clock = SystemClock> {
    ntasks: u64,
    print_interval: f64,
    print_remaining: bool,
    weighting: Weighting,

    ntasks_complete: u64,
    next_print_at: f64,
    samples: Vec<Sample>,

    t_start: f64,
    t_stop: f64,
    t_last_stop: f64,

    clock: C,
    sink: Box<dyn Write>,
}

impl Progress<SystemClock> {
    /// Tracker with the stock settings: print every 10% of progress with a
    /// remaining-time estimate, uniform weighting.
    pub fn new(ntasks: u64) -> Result<Self> {
        Self::with_options(ntasks, 0.1, true, Weighting::None)
    }

    /// Tracker with explicit print and estimate settings.
    ///
    /// `print_interval` is the progress fraction between status lines, in
    /// [0, 1]; 0 disables periodic printing entirely.
    pub fn with_options(
        ntasks: u64,
        print_interval: f64,
        print_remaining: bool,
        weighting: Weighting,
    ) -> Result<Self> {
        Self::with_clock(
            ntasks,
            print_interval,
            print_remaining,
            weighting,
            SystemClock::new(),
        )
    }
}

impl<C: Clock> Progress<C> {
    /// Tracker reading time from the given clock (tests inject a
    /// [`crate::clock::ManualClock`] here).
    pub fn with_clock(
        ntasks: u64,
        print_interval: f64,
        print_remaining: bool,
        weighting: Weighting,
        clock: C,
    ) -> Result<Self> {
        if ntasks == 0 {
            return Err(Error::InvalidTaskCount);
        }
        if !(0.0..=1.0).contains(&print_interval) {
            return Err(Error::InvalidPrintInterval(print_interval));
        }

        let now = clock.now();
        Ok(Self {
            ntasks,
            print_interval,
            print_remaining,
            weighting,
            ntasks_complete: 0,
            next_print_at: 0.0,
            samples: Vec::with_capacity(ntasks as usize),
            t_start: now,
            t_stop: now,
            t_last_stop: now,
            clock,
            sink: Box::new(io::stdout()),
        })
    }

    /// Redirect progress and report lines away from stdout (tests pass a
    /// shared byte buffer).
    pub fn with_sink(mut self, sink: Box<dyn Write>) -> Self {
        self.sink = sink;
        self
    }

    /// Mark the start of a measurement interval.
    pub fn begin(&mut self) {
        let now = self.clock.now();
        self.t_start = now;
        self.t_stop = now;
    }

    /// Close the current interval, crediting its time evenly to `n` completed
    /// tasks, then print progress according to the print settings.
    pub fn record(&mut self, n: u64) -> Result<()> {
        if n == 0 {
            return Err(Error::ZeroTaskRecord);
        }

        self.t_last_stop = self.t_stop;
        self.t_stop = self.clock.now();

        let task_share = (self.t_stop - self.t_start) / n as f64;
        let since_start_share = (self.t_stop - self.t_last_stop) / n as f64;
        for _ in 0..n {
            self.samples.push(Sample {
                task_share,
                since_start_share,
            });
        }
        self.ntasks_complete += n;

        if self.print_interval != 0.0 {
            self.print()?;
        }
        Ok(())
    }

    /// Tasks recorded so far.
    pub fn completed(&self) -> u64 {
        self.ntasks_complete
    }

    /// Total expected task count.
    pub fn total_tasks(&self) -> u64 {
        self.ntasks
    }

    /// Average time for one task, counting only begin/record windows.
    pub fn avg_per_task(&self) -> Result<f64> {
        estimate::uniform_mean(&self.task_shares())
    }

    /// Average time per task based on the time since the first `begin()`,
    /// under the given weighting.
    pub fn avg_since_start(&self, weighting: Weighting) -> Result<f64> {
        estimate::mean(&self.since_start_shares(), weighting)
    }

    /// Estimated time remaining for the tasks not yet recorded.
    pub fn estimate_remaining(&self, weighting: Weighting) -> Result<f64> {
        let left = self.ntasks as f64 - self.ntasks_complete as f64;
        Ok(left * self.avg_since_start(weighting)?)
    }

    /// Remaining-time estimate rendered with the tracker's configured
    /// weighting.
    pub fn remaining_str(&self) -> Result<String> {
        Ok(format_duration(self.estimate_remaining(self.weighting)?))
    }

    /// Total time across measured intervals (sum of per-task shares).
    pub fn total_per_task(&self) -> f64 {
        self.samples.iter().map(|s| s.task_share).sum()
    }

    /// Total time since the first `begin()`.
    pub fn total_since_start(&self) -> f64 {
        self.samples.iter().map(|s| s.since_start_share).sum()
    }

    /// Emit a status line if cumulative progress has reached the next print
    /// threshold, then advance the threshold by the print interval.
    ///
    /// The threshold starts at 0 and the check is `>=`, so the first
    /// `record()` always prints.
    pub fn print(&mut self) -> Result<()> {
        let progress = self.ntasks_complete as f64 / self.ntasks as f64;
        if progress < self.next_print_at {
            return Ok(());
        }

        let mut line = format!("{:4.3}% complete.", progress * 100.0);
        if self.print_remaining {
            match self.remaining_str() {
                Ok(rem) => {
                    line.push(' ');
                    line.push_str(&rem);
                    line.push_str(" remaining");
                }
                // Linear weighting cannot estimate from a single sample; the
                // suffix reappears once a second interval is recorded.
                Err(Error::InsufficientSamples { .. }) => {
                    tracing::debug!("remaining-time estimate not yet available");
                }
                Err(e) => return Err(e),
            }
        }
        writeln!(self.sink, "{line}")?;

        self.next_print_at += self.print_interval;
        Ok(())
    }

    /// Print the closing two-line summary: total time since the first
    /// `begin()` and the average time for one task.
    pub fn report(&mut self) -> Result<()> {
        let total = format_duration(self.total_since_start());
        let avg = format_duration(self.avg_per_task()?);
        writeln!(self.sink, "Total time passed: {total}")?;
        writeln!(self.sink, "Average time for one task: {avg}")?;
        Ok(())
    }

    fn task_shares(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.task_share).collect()
    }

    fn since_start_shares(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.since_start_share).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Byte sink the test keeps a handle to while the tracker owns a clone.
    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }

        fn lines(&self) -> Vec<String> {
            self.contents().lines().map(str::to_string).collect()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn tracker(
        ntasks: u64,
        interval: f64,
        print_remaining: bool,
        weighting: Weighting,
    ) -> (Progress<Rc<ManualClock>>, Rc<ManualClock>, SharedBuf) {
        let clock = Rc::new(ManualClock::new());
        let buf = SharedBuf::default();
        let tracker =
            Progress::with_clock(ntasks, interval, print_remaining, weighting, clock.clone())
                .unwrap()
                .with_sink(Box::new(buf.clone()));
        (tracker, clock, buf)
    }

    #[test]
    fn rejects_zero_task_total() {
        assert!(matches!(Progress::new(0), Err(Error::InvalidTaskCount)));
    }

    #[test]
    fn rejects_out_of_range_print_interval() {
        assert!(matches!(
            Progress::with_options(10, 1.5, true, Weighting::None),
            Err(Error::InvalidPrintInterval(_))
        ));
        assert!(matches!(
            Progress::with_options(10, -0.1, true, Weighting::None),
            Err(Error::InvalidPrintInterval(_))
        ));
    }

    #[test]
    fn rejects_zero_task_record() {
        let (mut t, _clock, _buf) = tracker(10, 0.0, false, Weighting::None);
        t.begin();
        assert!(matches!(t.record(0), Err(Error::ZeroTaskRecord)));
        assert_eq!(t.completed(), 0);
    }

    #[test]
    fn completed_count_accumulates_across_records() {
        let (mut t, clock, _buf) = tracker(100, 0.0, false, Weighting::None);
        for k in [1, 4, 2, 3] {
            t.begin();
            clock.advance(0.5);
            t.record(k).unwrap();
        }
        assert_eq!(t.completed(), 10);
    }

    #[test]
    fn batch_record_splits_interval_evenly() {
        let (mut t, clock, _buf) = tracker(10, 0.0, false, Weighting::None);
        t.begin();
        clock.advance(4.0);
        t.record(4).unwrap();

        assert_eq!(t.completed(), 4);
        assert!((t.avg_per_task().unwrap() - 1.0).abs() < 1e-12);
        assert!((t.total_per_task() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn avg_per_task_is_mean_of_shares() {
        let (mut t, clock, _buf) = tracker(10, 0.0, false, Weighting::None);
        t.begin();
        clock.advance(1.0);
        t.record(1).unwrap();
        t.begin();
        clock.advance(3.0);
        t.record(1).unwrap();
        assert!((t.avg_per_task().unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn avg_per_task_invariant_under_record_order() {
        let orders: [&[f64]; 2] = [&[1.0, 3.0, 2.0], &[2.0, 1.0, 3.0]];
        let mut means = Vec::new();
        for order in orders {
            let (mut t, clock, _buf) = tracker(10, 0.0, false, Weighting::None);
            for &secs in order {
                t.begin();
                clock.advance(secs);
                t.record(1).unwrap();
            }
            means.push(t.avg_per_task().unwrap());
        }
        assert!((means[0] - means[1]).abs() < 1e-12);
    }

    #[test]
    fn avg_fails_before_first_record() {
        let (t, _clock, _buf) = tracker(10, 0.0, false, Weighting::None);
        assert!(matches!(t.avg_per_task(), Err(Error::NoSamples)));
        assert!(matches!(
            t.avg_since_start(Weighting::None),
            Err(Error::NoSamples)
        ));
    }

    #[test]
    fn uniform_estimate_scales_by_remaining_tasks() {
        let (mut t, clock, _buf) = tracker(10, 0.0, false, Weighting::None);
        for _ in 0..2 {
            t.begin();
            clock.advance(1.0);
            t.record(1).unwrap();
        }
        let est = t.estimate_remaining(Weighting::None).unwrap();
        assert!((est - 8.0).abs() < 1e-12);
    }

    #[test]
    fn linear_estimate_needs_two_intervals() {
        let (mut t, clock, _buf) = tracker(10, 0.0, false, Weighting::Linear);
        t.begin();
        clock.advance(1.0);
        t.record(1).unwrap();
        assert!(matches!(
            t.estimate_remaining(Weighting::Linear),
            Err(Error::InsufficientSamples { .. })
        ));

        t.begin();
        clock.advance(1.0);
        t.record(1).unwrap();
        // Weighted mean of [1.0, 1.0] is (1 + 2) / (2*1/2) = 3.0; eight
        // tasks remain.
        let est = t.estimate_remaining(Weighting::Linear).unwrap();
        assert!((est - 24.0).abs() < 1e-12);
    }

    #[test]
    fn begin_resets_both_interval_markers() {
        let (mut t, clock, _buf) = tracker(10, 0.0, false, Weighting::None);
        clock.advance(2.0); // before the first begin, not measured
        t.begin();
        clock.advance(1.0);
        t.record(1).unwrap();

        assert!((t.total_per_task() - 1.0).abs() < 1e-12);
        assert!((t.total_since_start() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn record_without_begin_diverges_from_interval_shares() {
        let (mut t, clock, _buf) = tracker(10, 0.0, false, Weighting::None);
        t.begin();
        clock.advance(1.0);
        t.record(1).unwrap();
        clock.advance(2.0);
        // No begin: the task share spans the whole window since the last
        // begin, the since-start share only the gap to the last record.
        t.record(1).unwrap();

        assert!((t.total_per_task() - 4.0).abs() < 1e-12);
        assert!((t.total_since_start() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn first_record_always_prints() {
        let (mut t, clock, buf) = tracker(100, 0.1, false, Weighting::None);
        t.begin();
        clock.advance(1.0);
        t.record(1).unwrap();
        assert_eq!(buf.lines(), vec!["1.000% complete.".to_string()]);
    }

    #[test]
    fn print_threshold_steps_by_interval() {
        let (mut t, clock, buf) = tracker(4, 0.5, false, Weighting::None);
        for _ in 0..4 {
            t.begin();
            clock.advance(1.0);
            t.record(1).unwrap();
        }
        // Thresholds crossed at 0, 0.5, and 1.0: three lines total, within
        // the ceil(1/interval) + 1 bound.
        let lines = buf.lines();
        assert_eq!(
            lines,
            vec![
                "25.000% complete.".to_string(),
                "50.000% complete.".to_string(),
                "100.000% complete.".to_string(),
            ]
        );
        assert!(lines.len() as f64 <= (1.0f64 / 0.5).ceil() + 1.0);
    }

    #[test]
    fn zero_interval_disables_printing() {
        let (mut t, clock, buf) = tracker(4, 0.0, true, Weighting::None);
        for _ in 0..4 {
            t.begin();
            clock.advance(1.0);
            t.record(1).unwrap();
        }
        assert!(buf.contents().is_empty());
    }

    #[test]
    fn progress_line_carries_remaining_estimate() {
        let (mut t, clock, buf) = tracker(10, 0.1, true, Weighting::None);
        t.begin();
        clock.advance(1.0);
        t.record(1).unwrap();
        assert_eq!(
            buf.lines(),
            vec!["10.000% complete. 09.000s remaining".to_string()]
        );
    }

    #[test]
    fn linear_first_line_omits_unavailable_estimate() {
        let (mut t, clock, buf) = tracker(4, 0.1, true, Weighting::Linear);
        t.begin();
        clock.advance(1.0);
        t.record(1).unwrap();
        t.begin();
        clock.advance(1.0);
        t.record(1).unwrap();
        assert_eq!(
            buf.lines(),
            vec![
                "25.000% complete.".to_string(),
                "50.000% complete. 06.000s remaining".to_string(),
            ]
        );
    }

    #[test]
    fn report_prints_total_and_average() {
        let (mut t, clock, buf) = tracker(2, 0.0, false, Weighting::None);
        for _ in 0..2 {
            t.begin();
            clock.advance(90.0);
            t.record(1).unwrap();
        }
        t.report().unwrap();
        assert_eq!(
            buf.lines(),
            vec![
                "Total time passed: 3m 00.000s".to_string(),
                "Average time for one task: 1m 30.000s".to_string(),
            ]
        );
    }
}
