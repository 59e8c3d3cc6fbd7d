use serde::Serialize;

use alarmboard_core::alarm::{Alarm, AlarmDraft, AlarmTime, DismissalMode, DismissalSettings};
use alarmboard_core::recurrence::{RecurrencePreview, WeekdaySet};
use alarmboard_core::{AlarmApp, Config, PatternSequence, RepeatSpec};
use chrono::Weekday;

use super::parse_now;

#[derive(Serialize)]
struct Card<'a> {
    alarm: &'a Alarm,
    next: RecurrencePreview,
}

fn seed() -> Result<Vec<AlarmDraft>, Box<dyn std::error::Error>> {
    let wake = AlarmDraft {
        title: "Wake up".into(),
        time: AlarmTime::clamped(6, 40),
        repeat: RepeatSpec::weekly(WeekdaySet::WORKDAYS),
        dismissal: DismissalSettings {
            active: DismissalMode::Pattern,
            pattern: Some(PatternSequence::try_from(vec![0, 4, 8])?),
            auto_timeout: None,
        },
        ..AlarmDraft::default()
    };
    let ready = AlarmDraft {
        title: "Get ready".into(),
        time: AlarmTime::clamped(7, 10),
        repeat: RepeatSpec::weekly(WeekdaySet::ALL),
        enabled: false,
        ..AlarmDraft::default()
    };
    let workout = AlarmDraft {
        title: "Workout".into(),
        time: AlarmTime::clamped(20, 30),
        repeat: RepeatSpec::weekly([Weekday::Mon, Weekday::Wed, Weekday::Fri].into_iter().collect()),
        sound: false,
        ..AlarmDraft::default()
    };
    Ok(vec![wake, ready, workout])
}

pub fn run(now: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let now = parse_now(now)?;
    let mut app = AlarmApp::new(&Config::load_or_default());

    // the board lists newest first
    for draft in seed()?.into_iter().rev() {
        app.add(draft)?;
    }

    let snapshot = app.snapshot();
    let mut cards = Vec::with_capacity(snapshot.len());
    for alarm in snapshot.iter() {
        let next = app.preview(alarm.id(), now)?;
        cards.push(Card { alarm, next });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    for card in &cards {
        let alarm = card.alarm;
        println!(
            "{}  {:<3}  {:<10}  {:<34}  next {}  dismiss {:?}",
            alarm.time,
            if alarm.enabled { "on" } else { "off" },
            alarm.display_title(),
            alarm.repeat_label(),
            card.next.preview_text(),
            alarm.dismissal.active,
        );
    }
    Ok(())
}
