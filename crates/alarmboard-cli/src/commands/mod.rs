pub mod config;
pub mod demo;
pub mod gesture;
pub mod pattern;
pub mod repeat;

use chrono::{Local, NaiveDateTime};

/// Parse `--now`, falling back to the local wall clock.
pub fn parse_now(now: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match now {
        Some(text) => Ok(NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%d %H:%M")
            .map_err(|e| format!("invalid --now '{text}': {e} (expected YYYY-MM-DD HH:MM)"))?),
        None => Ok(Local::now().naive_local()),
    }
}
