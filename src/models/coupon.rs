//! WildcardCoupon: a one-time code that registers a player with wildcard priority.

/// An issued coupon. Redeeming it removes it from the ledger.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WildcardCoupon {
    /// Redemption key. Not required to be unique; the first unused match wins.
    pub code: String,
    pub name: String,
    /// Ledger ordering key (ascending). Also becomes the player's rank.
    pub rank: u32,
    pub affiliation: String,
    /// Only ever true for coupons loaded from a file that recorded them as used.
    pub used: bool,
}

impl WildcardCoupon {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        rank: u32,
        affiliation: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            rank,
            affiliation: affiliation.into(),
            used: false,
        }
    }
}

/// What a redeemed coupon hands to the roster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CouponPayload {
    pub name: String,
    pub rank: u32,
    pub affiliation: String,
}

impl From<WildcardCoupon> for CouponPayload {
    fn from(c: WildcardCoupon) -> Self {
        Self {
            name: c.name,
            rank: c.rank,
            affiliation: c.affiliation,
        }
    }
}
