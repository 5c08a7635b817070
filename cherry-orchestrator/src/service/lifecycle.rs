//! Lifecycle State Tracker
//!
//! Compiled and running flags of each cherry. All writes go through the
//! registry record; there is no separate lifecycle log.

use chrono::{DateTime, Utc};
use cherry_core::domain::cherry::RunState;
use tracing::{debug, info};

use crate::repository::CherryRegistry;

#[derive(Debug, Clone)]
pub struct LifecycleTracker {
    registry: CherryRegistry,
}

impl LifecycleTracker {
    pub fn new(registry: CherryRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CherryRegistry {
        &self.registry
    }

    /// Sets `is_compiled` and refreshes `last_compiled`
    ///
    /// Returns false when no cherry has `id`.
    pub fn mark_compiled(&self, id: &str) -> bool {
        let updated = self
            .registry
            .update(id, |c| {
                c.is_compiled = true;
                c.last_compiled = Some(fresh(c.last_compiled));
            })
            .is_some();

        if updated {
            info!("Cherry {} marked compiled", id);
        } else {
            debug!("mark_compiled: no cherry {}", id);
        }
        updated
    }

    /// Sets `is_running` and refreshes `last_run`
    ///
    /// Independent of `is_compiled`: manually added cherries can run too.
    pub fn mark_running(&self, id: &str) -> bool {
        let updated = self
            .registry
            .update(id, |c| {
                c.is_running = true;
                c.last_run = Some(fresh(c.last_run));
            })
            .is_some();

        if updated {
            info!("Cherry {} running", id);
        }
        updated
    }

    pub fn mark_stopped(&self, id: &str) -> bool {
        let updated = self.registry.update(id, |c| c.is_running = false).is_some();

        if updated {
            info!("Cherry {} stopped", id);
        }
        updated
    }

    /// Flips the running flag, returning the new state
    pub fn toggle_run(&self, id: &str) -> Option<RunState> {
        let cherry = self.registry.get(id)?;
        match cherry.run_state() {
            RunState::Running => self.mark_stopped(id).then_some(RunState::Stopped),
            RunState::Stopped => self.mark_running(id).then_some(RunState::Running),
        }
    }
}

/// Current time, never earlier than the previous stamp
fn fresh(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    previous.map_or(now, |prev| prev.max(now))
}
