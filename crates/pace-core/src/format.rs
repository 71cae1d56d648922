//! Human-readable duration rendering.
//!
//! The textual layout is a de-facto wire format for anything scraping
//! tracker output: day/hour/minute components from the largest non-zero one
//! down, then a seconds field zero-padded to two integer digits with three
//! decimals. Pure string building, no stream state.

use crate::error::{Error, Result};

/// Format a duration in seconds as `Dd Hh Mm SS.SSSs`.
///
/// Components above the largest non-zero one are skipped; the seconds field
/// is always present. E.g. `174.2` -> `"2m 54.200s"`, `0.0` -> `"00.000s"`.
pub fn format_duration(secs: f64) -> String {
    if secs < 60.0 {
        return format!("{:06.3}s", secs);
    }

    let mut minutes = (secs / 60.0) as u64;
    let rem_secs = secs % 60.0;
    let mut hours = 0;
    let mut days = 0;
    if minutes >= 60 {
        hours = minutes / 60;
        minutes %= 60;
        if hours >= 24 {
            days = hours / 24;
            hours %= 24;
        }
    }

    let mut out = String::new();
    if days != 0 {
        out.push_str(&format!("{days}d "));
    }
    if hours != 0 || !out.is_empty() {
        out.push_str(&format!("{hours}h "));
    }
    if minutes != 0 || !out.is_empty() {
        out.push_str(&format!("{minutes}m "));
    }
    out.push_str(&format!("{rem_secs:06.3}s"));
    out
}

/// Restrict the rendering to a subset of components, e.g. `"dh"` for
/// days and hours only.
///
/// Declared in the public contract but not implemented; always returns
/// [`Error::NotImplemented`].
pub fn format_duration_parts(_secs: f64, _parts: &str) -> Result<String> {
    Err(Error::NotImplemented("format_duration_parts"))
}
