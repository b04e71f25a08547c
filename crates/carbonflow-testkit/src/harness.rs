//! Engine paired with a logical clock.
//!
//! Tests drive time explicitly with [`Harness::mine_blocks`]; every call made
//! through [`Harness::as_caller`] is stamped with the current tick.

use carbonflow_core::{
    Amount, CallContext, CarbonResult, EngineConfig, Identity, LogicalClock, ProjectId,
    ProjectSpec, ProjectStatus, Tick,
};
use carbonflow_engine::{CarbonEngine, Command, Outcome};

use crate::fixtures::deployer;

pub struct Harness {
    pub engine: CarbonEngine,
    pub clock: LogicalClock,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Default-config engine deployed by [`deployer`] at genesis.
    pub fn new() -> Self {
        Self {
            engine: CarbonEngine::new(deployer()),
            clock: LogicalClock::new(),
        }
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: CarbonEngine::with_config(deployer(), config).expect("valid test config"),
            clock: LogicalClock::new(),
        }
    }

    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Advance the clock by `blocks` ticks.
    pub fn mine_blocks(&mut self, blocks: u64) -> Tick {
        self.clock.advance(blocks)
    }

    pub fn ctx(&self, who: &Identity) -> CallContext {
        self.clock.context_for(who)
    }

    pub fn as_caller<'a>(&'a mut self, who: &Identity) -> CallerScope<'a> {
        let ctx = self.ctx(who);
        CallerScope {
            engine: &mut self.engine,
            ctx,
        }
    }
}

/// Calls made by one identity at one tick.
pub struct CallerScope<'a> {
    engine: &'a mut CarbonEngine,
    ctx: CallContext,
}

impl CallerScope<'_> {
    pub fn register_project(&mut self, spec: ProjectSpec) -> CarbonResult<ProjectId> {
        self.engine.register_project(&self.ctx, spec)
    }

    pub fn batch_register(&mut self, specs: Vec<ProjectSpec>) -> CarbonResult<Vec<ProjectId>> {
        self.engine.batch_register_projects(&self.ctx, specs)
    }

    pub fn update_status(&mut self, id: ProjectId, status: ProjectStatus) -> CarbonResult<()> {
        self.engine.update_project_status(&self.ctx, id, status)
    }

    pub fn authorize_oracle(&mut self, oracle: &Identity) -> CarbonResult<()> {
        self.engine.authorize_oracle(&self.ctx, oracle.clone())
    }

    pub fn verify_and_mint(&mut self, id: ProjectId, carbon_tons: u64) -> CarbonResult<Amount> {
        self.engine.verify_and_mint(&self.ctx, id, carbon_tons)
    }

    pub fn transfer(&mut self, amount: Amount, to: &Identity) -> CarbonResult<()> {
        self.engine.transfer_credits(&self.ctx, amount, to.clone())
    }

    pub fn contribute(&mut self, id: ProjectId, amount: Amount) -> CarbonResult<()> {
        self.engine.contribute_to_insurance(&self.ctx, id, amount)
    }

    pub fn blacklist(&mut self, who: &Identity, blacklisted: bool) -> CarbonResult<()> {
        self.engine.blacklist_user(&self.ctx, who.clone(), blacklisted)
    }

    pub fn run(&mut self, command: Command) -> CarbonResult<Outcome> {
        self.engine.execute(&self.ctx, command)
    }
}
