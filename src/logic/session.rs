//! Session state for the menu front end: who is logged in.

use crate::models::{PlayerId, Roster, RosterError};

/// Admin login literal (case-sensitive).
pub const ADMIN_ID: &str = "AdmiN";

/// Current login state. Exactly one session is active at a time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Session {
    #[default]
    LoggedOut,
    Admin,
    Player(PlayerId),
}

impl Session {
    /// Admin login: exact match against [`ADMIN_ID`].
    pub fn login_admin(input: &str) -> Option<Session> {
        (input.trim() == ADMIN_ID).then_some(Session::Admin)
    }

    /// Player login: the ID must belong to a registered player.
    pub fn login_player(roster: &Roster, id: PlayerId) -> Result<Session, RosterError> {
        roster.get(id).map(|p| Session::Player(p.id()))
    }

    /// The session after the logged-in player withdraws. Admins stay logged in.
    pub fn after_withdrawal(self, withdrawn: PlayerId) -> Session {
        match self {
            Session::Player(id) if id == withdrawn => Session::LoggedOut,
            other => other,
        }
    }
}
