//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `remind_core` wiring end to
//!   end: open a database, seed a few reminders, print the schedule.
//! - Keep output deterministic apart from the current date.

use chrono::{Duration, Local, NaiveDate};
use remind_core::db::open_db_in_memory;
use remind_core::{
    section_title, CategoryMask, DateKey, ReminderDraft, ReminderService,
    SqliteSnapshotRepository, WeekdaySet,
};

/// Fixed 8-color palette, RGB in 0..=1. Owned by presentation; the core
/// only stores the index.
const PALETTE: [(f64, f64, f64); 8] = [
    (1.0, 1.0, 1.0),
    (1.0, 0.0, 0.0),
    (1.0, 0.5, 0.0),
    (1.0, 1.0, 0.0),
    (0.0, 1.0, 0.0),
    (0.0, 1.0, 1.0),
    (0.0, 0.0, 1.0),
    (0.0, 0.0, 0.0),
];

/// Text color that stays readable on the given background.
fn text_colour(colour: (f64, f64, f64)) -> &'static str {
    let luminance = 0.2126 * colour.0 + 0.7152 * colour.1 + 0.0722 * colour.2;
    if luminance > 0.2 {
        "black"
    } else {
        "lightgrey"
    }
}

fn main() {
    println!("remind_core version={}", remind_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open database: {err}");
            std::process::exit(1);
        }
    };
    let repo = SqliteSnapshotRepository::new(&conn);
    let mut service = match ReminderService::load(repo) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("failed to load calendar: {err}");
            std::process::exit(1);
        }
    };

    let today: NaiveDate = Local::now().date_naive();
    let seeds = [
        ReminderDraft::one_off("Dentist", 1, DateKey::Day(today + Duration::days(1))),
        ReminderDraft::one_off("Sort photo albums", 4, DateKey::Unscheduled),
        ReminderDraft::weekly(
            "Gym",
            6,
            WeekdaySet::from_days([0, 2, 4]).expect("valid weekday pattern"),
            today,
            today + Duration::days(11),
        ),
    ];
    for draft in seeds {
        if let Err(err) = service.add(draft) {
            eprintln!("failed to add reminder: {err}");
            std::process::exit(1);
        }
    }

    let mask = CategoryMask::all_visible();
    for key in service.visible_keys(&mask) {
        println!("{}", section_title(&key, today, true));
        for reminder in service.occurrences_on(&key, &mask) {
            let colour = PALETTE[usize::from(reminder.category)];
            println!(
                "  {} (category {}, text {})",
                reminder.name,
                reminder.category,
                text_colour(colour)
            );
        }
    }
}
