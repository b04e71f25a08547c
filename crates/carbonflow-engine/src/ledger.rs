//! Credit ledger: balances, minting totals and the oracle registry.

use carbonflow_core::{safe_add, safe_sub, Amount, CarbonResult, Identity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreditLedger {
    balances: BTreeMap<Identity, Amount>,
    oracles: BTreeSet<Identity>,
    total_minted: Amount,
}

impl CreditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `who`; zero for identities that never held credits.
    pub fn balance(&self, who: &Identity) -> Amount {
        self.balances.get(who).copied().unwrap_or(0)
    }

    pub fn balances(&self) -> impl Iterator<Item = (&Identity, Amount)> {
        self.balances.iter().map(|(who, amount)| (who, *amount))
    }

    pub fn total_minted(&self) -> Amount {
        self.total_minted
    }

    pub fn is_oracle(&self, who: &Identity) -> bool {
        self.oracles.contains(who)
    }

    /// Returns whether the oracle was newly added.
    pub fn authorize_oracle(&mut self, who: Identity) -> bool {
        self.oracles.insert(who)
    }

    /// Returns whether the oracle was present.
    pub fn revoke_oracle(&mut self, who: &Identity) -> bool {
        self.oracles.remove(who)
    }

    /// Credit `owner` with freshly minted credits and grow the minted total.
    pub fn mint(&mut self, owner: &Identity, credits: Amount) -> CarbonResult<()> {
        let balance = safe_add(self.balance(owner), credits)?;
        let total = safe_add(self.total_minted, credits)?;
        self.balances.insert(owner.clone(), balance);
        self.total_minted = total;
        Ok(())
    }

    /// Move `amount` from `from` to `to`. Never creates or destroys credits.
    pub fn transfer(&mut self, from: &Identity, to: &Identity, amount: Amount) -> CarbonResult<()> {
        let sender = safe_sub(self.balance(from), amount)?;
        if from == to {
            return Ok(());
        }
        let recipient = safe_add(self.balance(to), amount)?;
        self.balances.insert(from.clone(), sender);
        self.balances.insert(to.clone(), recipient);
        Ok(())
    }
}
