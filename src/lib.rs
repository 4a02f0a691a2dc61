//! Esports tournament registration: library with models, roster logic and CSV storage.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{register_player, register_with_coupon, reorder_roster, Session, ADMIN_ID};
pub use models::{
    CouponPayload, PlayerEdit, PlayerId, PlayerRecord, Roster, RosterError, WildcardCoupon,
    WildcardLedger, DEFAULT_ACTIVE_CAPACITY, FIRST_PLAYER_ID, TIMESTAMP_FORMAT,
};
pub use storage::{
    load_ledger, load_roster, load_roster_with_capacity, save_ledger, save_roster, StorageError,
};
