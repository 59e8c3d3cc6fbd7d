use clap::Subcommand;
use serde::Serialize;

use alarmboard_core::gesture::{parse_script, GestureClassifier, GestureKind};
use alarmboard_core::Config;

#[derive(Subcommand)]
pub enum GestureAction {
    /// Classify a script such as "press@0 release@60 press@150"
    Simulate {
        /// Whitespace-separated <input>@<ms> steps
        script: String,
        /// Override the tap window (ms)
        #[arg(long)]
        tap_window: Option<u64>,
        /// Override the long-press threshold (ms)
        #[arg(long)]
        long_press: Option<u64>,
        /// Print JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct Emitted {
    at_ms: u64,
    gesture: GestureKind,
}

pub fn run(action: GestureAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GestureAction::Simulate {
            script,
            tap_window,
            long_press,
            json,
        } => {
            let mut timing = Config::load_or_default().gesture.timing();
            if let Some(ms) = tap_window {
                timing.tap_window_ms = ms;
            }
            if let Some(ms) = long_press {
                timing.long_press_ms = ms;
            }

            let steps = parse_script(&script)?;
            let mut classifier = GestureClassifier::new(timing);
            let mut emitted = Vec::new();

            for step in steps {
                // deadlines that passed before this input fire first
                while let Some(deadline) = classifier.next_deadline().filter(|d| *d <= step.at_ms) {
                    if let Some(gesture) = classifier.advance(deadline) {
                        emitted.push(Emitted { at_ms: deadline, gesture });
                    }
                }
                for action in step.input.normalize() {
                    if let Some(gesture) = classifier.handle(*action, step.at_ms) {
                        emitted.push(Emitted { at_ms: step.at_ms, gesture });
                    }
                }
            }
            while let Some(deadline) = classifier.next_deadline() {
                if let Some(gesture) = classifier.advance(deadline) {
                    emitted.push(Emitted { at_ms: deadline, gesture });
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&emitted)?);
            } else {
                for e in &emitted {
                    println!("{:>6}ms  {:?}", e.at_ms, e.gesture);
                }
            }
        }
    }
    Ok(())
}
