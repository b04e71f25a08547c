//! Single-writer handle over an engine shared between threads.
//!
//! All mutations go through one lock, so commands are applied in a total
//! order and each one sees the state left by the previous one.

use crate::command::{Command, Outcome};
use crate::engine::CarbonEngine;
use carbonflow_core::{CallContext, CarbonResult, Identity};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<CarbonEngine>>,
}

impl SharedEngine {
    pub fn new(engine: CarbonEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Engine with default parameters administered by `admin`.
    pub fn with_admin(admin: Identity) -> Self {
        Self::new(CarbonEngine::new(admin))
    }

    /// Apply one command under the write lock.
    pub fn submit(&self, ctx: &CallContext, command: Command) -> CarbonResult<Outcome> {
        self.inner.lock().execute(ctx, command)
    }

    /// Run a read-only closure against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&CarbonEngine) -> R) -> R {
        f(&*self.inner.lock())
    }

    /// Re-evaluate the circuit breaker against the current pool total.
    pub fn check_circuit_breaker(&self) -> bool {
        self.inner.lock().check_circuit_breaker()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> CarbonEngine {
        self.inner.lock().clone()
    }
}

impl From<CarbonEngine> for SharedEngine {
    fn from(engine: CarbonEngine) -> Self {
        Self::new(engine)
    }
}
