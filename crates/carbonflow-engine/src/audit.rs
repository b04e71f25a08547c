//! Conservation-law audit over a whole engine state.

use crate::engine::CarbonEngine;
use carbonflow_core::{Amount, ProjectId};

/// First conservation law found broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("sum of balances {balances} != total minted {total}")]
    BalancesVsTotalMinted { balances: Amount, total: Amount },

    #[error("sum of project credits {projects} != total minted {total}")]
    ProjectCreditsVsTotalMinted { projects: Amount, total: Amount },

    #[error("sum of pools {pools} != total insurance {total}")]
    PoolsVsTotalInsurance { pools: Amount, total: Amount },

    #[error("{project}: pool {pool} != insurance covered {covered}")]
    PoolVsCoverage {
        project: ProjectId,
        pool: Amount,
        covered: Amount,
    },

    #[error("pool held for unregistered {project}")]
    OrphanPool { project: ProjectId },

    #[error("sums exceed the amount range")]
    SumOverflow,
}

fn checked_sum(mut values: impl Iterator<Item = Amount>) -> Result<Amount, InvariantViolation> {
    values.try_fold(0, |acc: Amount, v| {
        acc.checked_add(v).ok_or(InvariantViolation::SumOverflow)
    })
}

/// Recompute both conservation laws from scratch.
pub(crate) fn audit(engine: &CarbonEngine) -> Result<(), InvariantViolation> {
    let ledger = engine.ledger();
    let registry = engine.registry();
    let insurance = engine.insurance();

    let total = ledger.total_minted();
    let balances = checked_sum(ledger.balances().map(|(_, amount)| amount))?;
    if balances != total {
        return Err(InvariantViolation::BalancesVsTotalMinted { balances, total });
    }
    let projects = checked_sum(registry.projects().map(|(_, p)| p.credits_minted))?;
    if projects != total {
        return Err(InvariantViolation::ProjectCreditsVsTotalMinted { projects, total });
    }

    let total = insurance.total();
    let pools = checked_sum(insurance.pools().map(|(_, amount)| amount))?;
    if pools != total {
        return Err(InvariantViolation::PoolsVsTotalInsurance { pools, total });
    }
    for (project, _) in insurance.pools() {
        if registry.get(project).is_none() {
            return Err(InvariantViolation::OrphanPool { project });
        }
    }
    for (id, project) in registry.projects() {
        let pool = insurance.pool(id).unwrap_or(0);
        if pool != project.insurance_covered {
            return Err(InvariantViolation::PoolVsCoverage {
                project: id,
                pool,
                covered: project.insurance_covered,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum([1, 2, 3].into_iter()), Ok(6));
        assert_eq!(checked_sum(std::iter::empty()), Ok(0));
        assert_eq!(
            checked_sum([Amount::MAX, 1].into_iter()),
            Err(InvariantViolation::SumOverflow)
        );
    }
}
