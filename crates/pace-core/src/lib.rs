pub mod config;
pub mod logging;

pub mod clock;
pub mod error;
pub mod estimate;
pub mod format;
pub mod stopwatch;
pub mod tracker;
