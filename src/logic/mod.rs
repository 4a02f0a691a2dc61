//! Registration business logic: reordering, registration paths, sessions.

mod registration;
mod reorder;
mod session;

pub use registration::{register_player, register_with_coupon};
pub use reorder::reorder_roster;
pub use session::{Session, ADMIN_ID};
