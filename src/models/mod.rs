//! Data structures for registration: players, the roster queue, wildcard coupons.

mod coupon;
mod ledger;
mod player;
mod roster;

pub use coupon::{CouponPayload, WildcardCoupon};
pub use ledger::WildcardLedger;
pub use player::{PlayerId, PlayerRecord, FIRST_PLAYER_ID, TIMESTAMP_FORMAT};
pub use roster::{PlayerEdit, Roster, RosterError, DEFAULT_ACTIVE_CAPACITY};
