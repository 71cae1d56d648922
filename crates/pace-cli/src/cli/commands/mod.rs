mod fmt;
mod run;

pub use fmt::run_fmt;
pub use run::run_demo;
