//! WildcardLedger: unredeemed coupons kept in ascending rank order.

use crate::models::coupon::{CouponPayload, WildcardCoupon};
use crate::models::roster::RosterError;

#[derive(Clone, Debug, Default)]
pub struct WildcardLedger {
    coupons: Vec<WildcardCoupon>,
}

impl WildcardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new coupon.
    pub fn add_coupon(
        &mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        rank: u32,
        affiliation: impl Into<String>,
    ) {
        let coupon = WildcardCoupon::new(code, name, rank, affiliation);
        log::info!("Wildcard for {} (code {}) added", coupon.name, coupon.code);
        self.insert(coupon);
    }

    /// Insert after every coupon with rank <= the new one, so equal ranks stay in arrival order.
    /// Duplicate codes are accepted.
    pub fn insert(&mut self, coupon: WildcardCoupon) {
        let at = self.coupons.partition_point(|c| c.rank <= coupon.rank);
        self.coupons.insert(at, coupon);
    }

    /// Redeem the first unused coupon with this code. It leaves the ledger for good.
    pub fn redeem(&mut self, code: &str) -> Result<CouponPayload, RosterError> {
        let idx = self
            .coupons
            .iter()
            .position(|c| c.code == code && !c.used)
            .ok_or_else(|| RosterError::CouponNotFound(code.to_string()))?;
        let coupon = self.coupons.remove(idx);
        log::info!("Redeemed wildcard code {} for {}", coupon.code, coupon.name);
        Ok(coupon.into())
    }

    /// All coupons in rank order, including used ones loaded from file.
    pub fn list(&self) -> &[WildcardCoupon] {
        &self.coupons
    }

    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}
