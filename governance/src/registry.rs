//! Owner-gated parameter registry.

use curate_types::{Amount, CurationError, Identity};
use serde::{Deserialize, Serialize};

/// Holds the mutable protocol parameters and the identity allowed to change them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceRegistry {
    /// Captured at deployment; never changes.
    owner: Identity,
    /// Stake escrowed by each new submission.
    min_stake: Amount,
}

impl GovernanceRegistry {
    pub fn new(owner: Identity, initial_min_stake: Amount) -> Self {
        Self {
            owner,
            min_stake: initial_min_stake,
        }
    }

    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    pub fn min_stake(&self) -> Amount {
        self.min_stake
    }

    pub fn is_owner(&self, caller: &Identity) -> bool {
        caller == &self.owner
    }

    /// Fail with `NotAuthorized` unless `caller` is the owner.
    pub fn authorize(&self, caller: &Identity) -> Result<(), CurationError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(CurationError::NotAuthorized(caller.clone()))
        }
    }

    /// Replace the minimum stake. Returns the previous value.
    ///
    /// Only later submissions see the new value; stakes already escrowed keep
    /// the amount they were submitted with.
    pub fn set_min_stake(
        &mut self,
        caller: &Identity,
        new_value: Amount,
    ) -> Result<Amount, CurationError> {
        self.authorize(caller)?;
        let previous = std::mem::replace(&mut self.min_stake, new_value);
        tracing::info!(
            owner = %caller,
            previous = %previous,
            min_stake = %new_value,
            "minimum stake updated"
        );
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curate_types::ErrorCode;

    fn registry() -> GovernanceRegistry {
        GovernanceRegistry::new(Identity::new("deployer"), Amount::new(100))
    }

    #[test]
    fn owner_can_update_min_stake() {
        let mut reg = registry();
        let previous = reg
            .set_min_stake(&Identity::new("deployer"), Amount::new(200))
            .unwrap();
        assert_eq!(previous, Amount::new(100));
        assert_eq!(reg.min_stake(), Amount::new(200));
    }

    #[test]
    fn non_owner_is_rejected_and_value_unchanged() {
        let mut reg = registry();
        let err = reg
            .set_min_stake(&Identity::new("user1"), Amount::new(200))
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::NotAuthorized));
        assert_eq!(reg.min_stake(), Amount::new(100));
    }

    #[test]
    fn zero_min_stake_is_accepted() {
        let mut reg = registry();
        reg.set_min_stake(&Identity::new("deployer"), Amount::ZERO).unwrap();
        assert!(reg.min_stake().is_zero());
    }

    #[test]
    fn owner_never_changes() {
        let mut reg = registry();
        reg.set_min_stake(&Identity::new("deployer"), Amount::new(5)).unwrap();
        assert_eq!(reg.owner(), &Identity::new("deployer"));
        assert!(reg.is_owner(&Identity::new("deployer")));
        assert!(!reg.is_owner(&Identity::new("deployer ")));
    }
}
