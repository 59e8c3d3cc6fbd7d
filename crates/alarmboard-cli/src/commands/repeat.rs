use clap::{Args, Subcommand};

use alarmboard_core::recurrence::{next_occurrence_within, RecurrencePreview, WeekdaySet};
use alarmboard_core::{AlarmTime, Config, RepeatSpec};

use super::parse_now;

#[derive(Args, Debug)]
pub struct RuleArgs {
    /// Weekdays, comma separated (e.g. "mon,wed,fri"); repeats weekly
    #[arg(long)]
    weekdays: Option<String>,
    /// Repeat every N weeks on the given weekdays
    #[arg(long)]
    every: Option<u32>,
    /// Days of the month, comma separated (e.g. "1,15"); overrides weekdays
    #[arg(long)]
    monthly: Option<String>,
}

impl RuleArgs {
    fn spec(&self) -> Result<RepeatSpec, Box<dyn std::error::Error>> {
        let weekdays = match &self.weekdays {
            Some(list) => WeekdaySet::parse_list(list)
                .ok_or_else(|| format!("invalid weekday list '{list}'"))?,
            None => WeekdaySet::EMPTY,
        };
        let spec = match (self.every, self.weekdays.is_some()) {
            (Some(n), _) => RepeatSpec::every_weeks(n, weekdays),
            (None, true) => RepeatSpec::weekly(weekdays),
            (None, false) => RepeatSpec::none(),
        };
        let Some(list) = &self.monthly else {
            return Ok(spec);
        };
        let days = list
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<u8>().map_err(|_| format!("invalid day of month '{p}'")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(spec.with_monthly_days(days))
    }
}

#[derive(Subcommand)]
pub enum RepeatAction {
    /// Print the canonical label for a rule
    Label {
        #[command(flatten)]
        rule: RuleArgs,
    },
    /// Print the next time the alarm fires
    Next {
        #[command(flatten)]
        rule: RuleArgs,
        /// Time of day, "HH:MM"
        #[arg(long)]
        time: String,
        /// Reference time, "YYYY-MM-DD HH:MM" (defaults to now)
        #[arg(long)]
        now: Option<String>,
        /// Print the label and next occurrence as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: RepeatAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RepeatAction::Label { rule } => {
            println!("{}", rule.spec()?.label());
        }
        RepeatAction::Next { rule, time, now, json } => {
            let spec = rule.spec()?;
            let time: AlarmTime = time.parse()?;
            let now = parse_now(now.as_deref())?;
            let horizon = Config::load_or_default().recurrence.search_horizon_days;
            if json {
                let preview = RecurrencePreview::compute(&spec, time, now, horizon);
                println!("{}", serde_json::to_string_pretty(&preview)?);
            } else {
                let next = next_occurrence_within(&spec, time, now, horizon)?;
                println!("{}", next.format("%Y-%m-%d %H:%M"));
            }
        }
    }
    Ok(())
}
