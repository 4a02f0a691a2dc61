//! Priority reordering: recompute roster order and the active/waiting split.

use crate::models::PlayerRecord;
use chrono::{Local, NaiveDateTime};

/// Re-sort every record and reassign `in_tournament`.
///
/// 1. Sort key: wildcard entrants first, then earliest registration time.
/// 2. The sort is stable, so equal keys keep their current relative order.
/// 3. A timestamp that does not parse counts as "now" (last among its wildcard class,
///    unless something is dated in the future).
/// 4. The first `capacity` records become active, the rest wait.
///
/// Empty input is a no-op.
pub fn reorder_roster(records: &mut [PlayerRecord], capacity: usize) {
    if records.is_empty() {
        return;
    }
    let now = Local::now().naive_local();
    records.sort_by_cached_key(|r| (!r.is_wildcard(), registration_time_or(r, now)));
    for (i, r) in records.iter_mut().enumerate() {
        r.set_in_tournament(i < capacity);
    }
    log::debug!(
        "Reordered {} player(s), {} active",
        records.len(),
        records.len().min(capacity)
    );
}

fn registration_time_or(record: &PlayerRecord, fallback: NaiveDateTime) -> NaiveDateTime {
    record.registration_time().unwrap_or_else(|| {
        log::warn!(
            "Failed to parse registration time [{}] for player {}; treating as now",
            record.registered_at(),
            record.id()
        );
        fallback
    })
}
