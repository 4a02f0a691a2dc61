//! Roster: the ordered, logically circular queue of registered players.

use crate::logic::reorder_roster;
use crate::models::player::{PlayerId, PlayerRecord, FIRST_PLAYER_ID};
use chrono::{Local, NaiveDateTime};
use std::collections::HashSet;

/// Number of active tournament slots.
pub const DEFAULT_ACTIVE_CAPACITY: usize = 12;

/// Errors returned by roster and ledger operations. None of them are fatal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RosterError {
    /// No player with this ID is registered.
    PlayerNotFound(PlayerId),
    /// No unused coupon with this code exists.
    CouponNotFound(String),
    /// Every player ID has been handed out.
    IdsExhausted,
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::PlayerNotFound(id) => write!(f, "Player ID {} not found", id),
            RosterError::CouponNotFound(_) => write!(f, "Invalid or already used coupon code"),
            RosterError::IdsExhausted => write!(f, "No player IDs left to assign"),
        }
    }
}

impl std::error::Error for RosterError {}

/// Partial update for [`Roster::edit_info`]. `None` keeps the current value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlayerEdit {
    pub name: Option<String>,
    pub rank: Option<u32>,
    pub affiliation: Option<String>,
}

impl PlayerEdit {
    /// Build an edit from raw menu input: blank strings mean "keep".
    /// A rank that is not a number is also treated as "keep".
    pub fn from_input(name: &str, rank: &str, affiliation: &str) -> Self {
        let non_blank = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Self {
            name: non_blank(name),
            rank: rank.trim().parse().ok(),
            affiliation: non_blank(affiliation),
        }
    }
}

/// All registered players in priority order. The first `capacity` are in the tournament.
///
/// Iteration is logically circular: [`Roster::next_after`] wraps from the last record to
/// the first. Records are owned here and only handed out by shared reference.
#[derive(Clone, Debug)]
pub struct Roster {
    players: Vec<PlayerRecord>,
    next_id: PlayerId,
    capacity: usize,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Empty roster with the standard 12 active slots.
    pub fn new() -> Self {
        Self::with_active_capacity(DEFAULT_ACTIVE_CAPACITY)
    }

    pub fn with_active_capacity(capacity: usize) -> Self {
        Self {
            players: Vec::new(),
            next_id: FIRST_PLAYER_ID,
            capacity,
        }
    }

    /// Build a roster from persisted records. The next ID continues after the highest
    /// loaded one, and a full reorder recomputes every `in_tournament` flag.
    ///
    /// IDs must stay unique: a record repeating an earlier ID is dropped, as is one carrying
    /// `PlayerId::MAX` (never handed out by [`Roster::enqueue_at`]).
    pub fn from_records(records: Vec<PlayerRecord>, capacity: usize) -> Self {
        let mut seen = HashSet::new();
        let records: Vec<PlayerRecord> = records
            .into_iter()
            .filter(|r| {
                if r.id() == PlayerId::MAX {
                    log::warn!("Skipping player with out-of-range ID {}", r.id());
                    false
                } else if !seen.insert(r.id()) {
                    log::warn!("Skipping duplicate player ID {} (\"{}\")", r.id(), r.name);
                    false
                } else {
                    true
                }
            })
            .collect();
        let next_id = records
            .iter()
            .map(|r| r.id() + 1)
            .fold(FIRST_PLAYER_ID, PlayerId::max);
        let mut roster = Self {
            players: records,
            next_id,
            capacity,
        };
        roster.reorder();
        roster
    }

    /// Register a player now. Returns the new ID.
    pub fn enqueue(
        &mut self,
        name: impl Into<String>,
        rank: u32,
        affiliation: impl Into<String>,
        is_wildcard: bool,
    ) -> Result<PlayerId, RosterError> {
        self.enqueue_at(name, rank, affiliation, is_wildcard, Local::now().naive_local())
    }

    /// Register a player with an explicit registration time. Returns the new ID, or
    /// `IdsExhausted` once the next ID would be `PlayerId::MAX`.
    pub fn enqueue_at(
        &mut self,
        name: impl Into<String>,
        rank: u32,
        affiliation: impl Into<String>,
        is_wildcard: bool,
        registered_at: NaiveDateTime,
    ) -> Result<PlayerId, RosterError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(RosterError::IdsExhausted)?;
        let mut record = PlayerRecord::new(id, name, rank, affiliation, registered_at, is_wildcard);
        // Provisional; the reorder below decides.
        record.set_in_tournament(self.active_count() < self.capacity);
        log::info!(
            "Registered player \"{}\" with ID {}{}",
            record.name,
            id,
            if is_wildcard { " (wildcard)" } else { "" }
        );
        self.players.push(record);
        self.reorder();
        Ok(id)
    }

    /// Remove a player. A waiting player is promoted if an active slot frees up.
    pub fn withdraw(&mut self, id: PlayerId) -> Result<PlayerRecord, RosterError> {
        let idx = self.position(id)?;
        let removed = self.players.remove(idx);
        log::info!("Withdrew player {} (\"{}\")", id, removed.name);
        self.reorder();
        Ok(removed)
    }

    /// Mark a player as checked in. Ordering is unaffected.
    pub fn check_in(&mut self, id: PlayerId) -> Result<(), RosterError> {
        let idx = self.position(id)?;
        self.players[idx].check_in();
        log::info!("Player {} checked in", id);
        Ok(())
    }

    /// Apply a partial update. Name, rank and affiliation are not ordering keys, so no reorder.
    pub fn edit_info(&mut self, id: PlayerId, edit: PlayerEdit) -> Result<(), RosterError> {
        let idx = self.position(id)?;
        let p = &mut self.players[idx];
        if let Some(name) = edit.name {
            p.name = name;
        }
        if let Some(rank) = edit.rank {
            p.rank = rank;
        }
        if let Some(affiliation) = edit.affiliation {
            p.affiliation = affiliation;
        }
        Ok(())
    }

    pub fn exists(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id() == id)
    }

    pub fn get(&self, id: PlayerId) -> Result<&PlayerRecord, RosterError> {
        self.players
            .iter()
            .find(|p| p.id() == id)
            .ok_or(RosterError::PlayerNotFound(id))
    }

    /// Current roster order (after the last reorder).
    pub fn list_all(&self) -> &[PlayerRecord] {
        &self.players
    }

    /// Players holding a tournament slot.
    pub fn active(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().filter(|p| p.in_tournament())
    }

    /// Players on the waiting list, in promotion order.
    pub fn waiting(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().filter(|p| !p.in_tournament())
    }

    /// Circular successor of `id`: the last record wraps around to the first.
    pub fn next_after(&self, id: PlayerId) -> Result<&PlayerRecord, RosterError> {
        let idx = self.position(id)?;
        Ok(&self.players[(idx + 1) % self.players.len()])
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.in_tournament()).count()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// ID the next registration will receive.
    pub fn next_id(&self) -> PlayerId {
        self.next_id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Full reordering pass. Runs automatically after enqueue and withdraw.
    pub fn reorder(&mut self) {
        reorder_roster(&mut self.players, self.capacity);
    }

    fn position(&self, id: PlayerId) -> Result<usize, RosterError> {
        self.players
            .iter()
            .position(|p| p.id() == id)
            .ok_or(RosterError::PlayerNotFound(id))
    }
}
