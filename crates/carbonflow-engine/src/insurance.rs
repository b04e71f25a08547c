//! Per-project insurance pools and their running total.

use carbonflow_core::{safe_add, Amount, CarbonResult, ProjectId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InsurancePool {
    pools: BTreeMap<ProjectId, Amount>,
    total: Amount,
}

impl InsurancePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool of `project`; `None` until the first contribution.
    pub fn pool(&self, project: ProjectId) -> Option<Amount> {
        self.pools.get(&project).copied()
    }

    pub fn pools(&self) -> impl Iterator<Item = (ProjectId, Amount)> + '_ {
        self.pools.iter().map(|(id, amount)| (*id, *amount))
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    /// Add `amount` to the project's pool and the total.
    pub fn contribute(&mut self, project: ProjectId, amount: Amount) -> CarbonResult<()> {
        let pool = safe_add(self.pool(project).unwrap_or(0), amount)?;
        let total = safe_add(self.total, amount)?;
        self.pools.insert(project, pool);
        self.total = total;
        Ok(())
    }
}
