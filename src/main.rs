//! Skystrike entry point
//!
//! Headless demo driver: runs one scripted round against the file-backed
//! gateways and prints the outcome and the record table.

use std::path::Path;

use skystrike::app::Session;
use skystrike::consts::*;
use skystrike::prefs::FilePreferences;
use skystrike::records::RecordBook;
use skystrike::sim::{InputEvent, Round, RoundPhase};

const PREFS_PATH: &str = "skystrike_prefs.json";
const RECORDS_PATH: &str = "skystrike_records.json";

fn main() {
    env_logger::init();
    log::info!("Skystrike starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("Round seed: {seed}");

    let prefs = FilePreferences::new(PREFS_PATH);
    let records = RecordBook::load(Path::new(RECORDS_PATH));
    let mut session = Session::new(prefs, records, seed);
    session.start_round();

    // 16ms frames with a naive chase-and-fire script standing in for the
    // player
    loop {
        let event = match session.round() {
            Some(round) if round.phase() == RoundPhase::Running => aim(round),
            _ => break,
        };
        if let Some(event) = event {
            session.handle_input(event);
        }
        session.tick(16);
    }

    if let Some(outcome) = session.round().and_then(|r| r.outcome()) {
        println!(
            "Round over: raw {} -> final {} ({} targets, {}s)",
            outcome.raw_score, outcome.final_score, outcome.target_count, outcome.duration_secs
        );
    }
    if let Some(notice) = session.notice() {
        println!("{notice}");
    }

    if let Err(err) = session.scores().save(Path::new(RECORDS_PATH)) {
        log::warn!("Could not save records: {err:#}");
    }
    print_records(session.scores());
}

/// Chase the nearest alive target and fire once lined up under it.
fn aim(round: &Round) -> Option<InputEvent> {
    if round.projectile().is_in_flight() {
        return None;
    }
    let projectile_center = round.projectile().pos().x + PROJECTILE_WIDTH / 2.0;
    let target = round
        .targets()
        .iter()
        .filter(|t| t.is_alive())
        .min_by(|a, b| {
            let da = (a.pos().x + TARGET_WIDTH / 2.0 - projectile_center).abs();
            let db = (b.pos().x + TARGET_WIDTH / 2.0 - projectile_center).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let delta = target.pos().x + TARGET_WIDTH / 2.0 - projectile_center;
    if delta.abs() <= PROJECTILE_STEP {
        Some(InputEvent::Fire)
    } else if delta < 0.0 {
        Some(InputEvent::MoveLeft)
    } else {
        Some(InputEvent::MoveRight)
    }
}

fn print_records(records: &RecordBook) {
    if records.is_empty() {
        println!("No records yet.");
        return;
    }
    println!("-- Records --");
    for (i, entry) in records.entries.iter().enumerate() {
        println!(
            "{:>2}. {:>6}  ({} targets, {}s)",
            i + 1,
            entry.final_score,
            entry.target_count,
            entry.duration_secs
        );
    }
}
