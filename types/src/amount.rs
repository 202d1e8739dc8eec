//! Native currency amounts.
//!
//! Amounts are unsigned integers (u128) in the ledger's smallest unit. All
//! arithmetic the core performs is checked; share computation truncates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Denominator for basis-point shares (10_000 = 100%).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// An amount of the native currency, in raw units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// `floor(self * bps / 10_000)`, exact for every u128 and never overflowing.
    ///
    /// Splits `self` into whole multiples of the denominator and a remainder so the
    /// intermediate product stays below `BPS_DENOMINATOR * bps`. `bps` is clamped
    /// to 100%.
    pub fn share_bps(self, bps: u32) -> Self {
        let bps = (bps as u128).min(BPS_DENOMINATOR);
        let whole = self.0 / BPS_DENOMINATOR;
        let rem = self.0 % BPS_DENOMINATOR;
        Self(whole * bps + rem * bps / BPS_DENOMINATOR)
    }
}

impl From<u128> for Amount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_percent_of_one_hundred() {
        assert_eq!(Amount::new(100).share_bps(6000), Amount::new(60));
    }

    #[test]
    fn share_truncates() {
        assert_eq!(Amount::new(7).share_bps(6000), Amount::new(4));
        assert_eq!(Amount::new(1).share_bps(6000), Amount::ZERO);
    }

    #[test]
    fn share_of_max_does_not_overflow() {
        let max = Amount::new(u128::MAX);
        assert_eq!(max.share_bps(10_000), max);
        assert!(max.share_bps(6000) < max);
    }

    #[test]
    fn share_clamps_above_full() {
        assert_eq!(Amount::new(50).share_bps(20_000), Amount::new(50));
    }
}
