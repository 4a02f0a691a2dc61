//! Registration paths: normal sign-up and wildcard coupon redemption.

use crate::models::{PlayerId, Roster, RosterError, WildcardLedger};

/// Normal registration: ordinary priority, current time.
pub fn register_player(
    roster: &mut Roster,
    name: impl Into<String>,
    rank: u32,
    affiliation: impl Into<String>,
) -> Result<PlayerId, RosterError> {
    roster.enqueue(name, rank, affiliation, false)
}

/// Wildcard registration: redeem `code` and enqueue its holder with wildcard priority.
///
/// An unknown or already redeemed code leaves both the ledger and the roster untouched,
/// and so does a roster that has run out of IDs.
pub fn register_with_coupon(
    roster: &mut Roster,
    ledger: &mut WildcardLedger,
    code: &str,
) -> Result<PlayerId, RosterError> {
    if roster.next_id() == PlayerId::MAX {
        return Err(RosterError::IdsExhausted);
    }
    let payload = ledger.redeem(code.trim())?;
    roster.enqueue(payload.name, payload.rank, payload.affiliation, true)
}
