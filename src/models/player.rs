//! PlayerRecord: one registered entrant.

use chrono::NaiveDateTime;

/// Unique identifier for a player. Assigned monotonically, starting at [`FIRST_PLAYER_ID`].
pub type PlayerId = u32;

/// First ID handed out by an empty roster.
pub const FIRST_PLAYER_ID: PlayerId = 1000;

/// Persisted timestamp format, local time, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A registered player (active or waiting).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerRecord {
    id: PlayerId,
    pub name: String,
    /// Lower is stronger. Registration metadata only; never used for ordering.
    pub rank: u32,
    pub affiliation: String,
    pub checked_in: bool,
    /// Kept as text so a damaged timestamp survives a load/save cycle untouched.
    registered_at: String,
    is_wildcard: bool,
    in_tournament: bool,
}

impl PlayerRecord {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        rank: u32,
        affiliation: impl Into<String>,
        registered_at: NaiveDateTime,
        is_wildcard: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            rank,
            affiliation: affiliation.into(),
            checked_in: false,
            registered_at: registered_at.format(TIMESTAMP_FORMAT).to_string(),
            is_wildcard,
            in_tournament: false,
        }
    }

    /// Rebuild a record exactly as it was persisted (used by the loader).
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: PlayerId,
        name: String,
        rank: u32,
        affiliation: String,
        checked_in: bool,
        registered_at: String,
        is_wildcard: bool,
        in_tournament: bool,
    ) -> Self {
        Self {
            id,
            name,
            rank,
            affiliation,
            checked_in,
            registered_at,
            is_wildcard,
            in_tournament,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn is_wildcard(&self) -> bool {
        self.is_wildcard
    }

    /// Whether the player holds one of the capacity-limited slots.
    pub fn in_tournament(&self) -> bool {
        self.in_tournament
    }

    /// Registration time as stored.
    pub fn registered_at(&self) -> &str {
        &self.registered_at
    }

    /// Parsed registration time, or None if the stored text is malformed.
    pub fn registration_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.registered_at.trim(), TIMESTAMP_FORMAT).ok()
    }

    pub(crate) fn set_in_tournament(&mut self, active: bool) {
        self.in_tournament = active;
    }

    /// Mark the player as checked in.
    pub fn check_in(&mut self) {
        self.checked_in = true;
    }
}
