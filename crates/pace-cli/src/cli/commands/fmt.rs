//! `pace fmt`: render a duration using the tracker's textual layout.

use pace_core::format::format_duration;

pub fn run_fmt(seconds: f64) {
    println!("{}", format_duration(seconds));
}
