//! Care scheduling calculator.
//!
//! Pure date arithmetic over a plant's last-action timestamps and intervals:
//! classifying the next occurrence of each care kind relative to "today" and
//! generating the bounded list of upcoming task occurrences. All functions
//! take the current day as an explicit parameter so results are deterministic
//! and the calculator never reads a clock.

use crate::models::{ActionKind, Plant, TaskOccurrence};
use chrono::{DateTime, Days, NaiveDate, Utc};

/// Default horizon for task generation, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Calendar day on which the next occurrence of an action falls.
///
/// Time-of-day is ignored: the last-performed timestamp is truncated to its
/// UTC calendar day before adding the interval. A last-performed timestamp in
/// the future is carried through arithmetically with no clamping.
#[must_use]
pub fn next_occurrence(last_performed_at: DateTime<Utc>, interval_days: u32) -> NaiveDate {
    last_performed_at.date_naive() + Days::new(u64::from(interval_days))
}

/// True iff the next occurrence falls exactly on `today`.
#[must_use]
pub fn is_due_today(last_performed_at: DateTime<Utc>, interval_days: u32, today: NaiveDate) -> bool {
    next_occurrence(last_performed_at, interval_days) == today
}

/// True iff the next occurrence falls strictly before `today`.
///
/// Mutually exclusive with [`is_due_today`] for the same inputs.
#[must_use]
pub fn is_overdue(last_performed_at: DateTime<Utc>, interval_days: u32, today: NaiveDate) -> bool {
    next_occurrence(last_performed_at, interval_days) < today
}

/// Generates every upcoming task occurrence within the window.
///
/// For each plant, watering occurrences are emitted before misting
/// occurrences; the combined list is in per-plant insertion order, not date
/// order. Callers wanting a calendar view sort by date themselves.
///
/// A schedule that has fallen behind is caught up to its nearest present or
/// future occurrence first; missed days are not backfilled. Every emitted
/// date `d` satisfies `today <= d < today + window_days`.
#[must_use]
pub fn upcoming_tasks(plants: &[Plant], today: NaiveDate, window_days: u32) -> Vec<TaskOccurrence> {
    let horizon_end = today + Days::new(u64::from(window_days));
    let mut tasks = Vec::new();

    for plant in plants {
        for kind in [ActionKind::Watering, ActionKind::Misting] {
            push_occurrences(&mut tasks, plant, kind, today, horizon_end);
        }
    }

    tasks
}

/// Emits all occurrences of one care kind for one plant within the window.
fn push_occurrences(
    tasks: &mut Vec<TaskOccurrence>,
    plant: &Plant,
    kind: ActionKind,
    today: NaiveDate,
    horizon_end: NaiveDate,
) {
    let interval_days = plant.interval_days(kind);
    if interval_days == 0 {
        // Interval zero never advances; only reachable via hand-edited
        // storage since validation rejects it at the write path.
        return;
    }

    let step = Days::new(u64::from(interval_days));

    // Catch up a neglected schedule to the first occurrence on or after today.
    let mut next = plant.last_performed(kind).date_naive();
    while next < today {
        next = next + step;
    }

    while next < horizon_end {
        tasks.push(TaskOccurrence {
            plant_id: plant.id,
            plant_name: plant.name.clone(),
            kind,
            date: next,
        });
        next = next + step;
    }
}
