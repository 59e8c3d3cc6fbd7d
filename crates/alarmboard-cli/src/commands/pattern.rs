use clap::Subcommand;

use alarmboard_core::pattern::{PatternCapture, PatternPhase, PatternSequence, PatternSetup, Point};
use alarmboard_core::Config;

#[derive(Subcommand)]
pub enum PatternAction {
    /// Run a candidate and its confirmation through setup
    Confirm {
        /// First drawing, node indices (e.g. "0,4,8")
        #[arg(long)]
        candidate: String,
        /// Second drawing; omitted means setup stops at the confirm step
        #[arg(long)]
        confirm: Option<String>,
        /// Print the final phase as JSON
        #[arg(long)]
        json: bool,
    },
    /// Map a drag path of "x,y" points to the nodes it passes through
    Trace {
        /// Whitespace-separated points (e.g. "40,40 120,120 200,200")
        points: String,
    },
}

fn parse_point(text: &str) -> Result<Point, Box<dyn std::error::Error>> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{text}'"))?;
    Ok(Point::new(x.trim().parse()?, y.trim().parse()?))
}

fn print_phase(phase: &PatternPhase, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(phase)?);
        return Ok(());
    }
    match phase {
        PatternPhase::Success(seq) => println!("success {seq}"),
        PatternPhase::Confirming => println!("confirming"),
        other => println!("{other:?}"),
    }
    Ok(())
}

pub fn run(action: PatternAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    match action {
        PatternAction::Confirm {
            candidate,
            confirm,
            json,
        } => {
            let mut setup = PatternSetup::new(None, config.pattern.grid(), config.pattern.min_nodes);
            setup.submit(PatternSequence::parse_list(&candidate)?)?;
            if let Some(confirm) = confirm {
                setup.submit(PatternSequence::parse_list(&confirm)?)?;
            }
            print_phase(&setup.phase(), json)?;
        }
        PatternAction::Trace { points } => {
            let mut points = points.split_whitespace().map(parse_point);
            let mut capture = PatternCapture::new(config.pattern.grid());
            let Some(first) = points.next() else {
                return Err("no points given".into());
            };
            capture.begin(first?);
            for p in points {
                capture.track(p?);
            }
            println!("{}", capture.end());
        }
    }
    Ok(())
}
