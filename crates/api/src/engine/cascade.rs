//! One-level state propagation from a general breaker to its children.

use loto_core::audit::UserMode;
use loto_core::types::DbId;
use loto_db::models::breaker::{Breaker, UpdateBreaker};
use loto_db::repositories::BreakerRepo;
use serde::Serialize;

use super::LockoutEngine;
use crate::error::AppResult;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeOutcome {
    /// The parent as written.
    pub breaker: Breaker,
    pub children_updated: u32,
    pub children_failed: u32,
}

impl LockoutEngine {
    /// Update a breaker, then push an Off or Closed state to every breaker
    /// naming it as `general_breaker`.
    ///
    /// Grandchildren are not visited. Setting a parent On never touches its
    /// children. Each child runs the full reconciliation path; a failed
    /// child is logged and counted without undoing the parent or its
    /// siblings.
    pub async fn update_breaker_cascading(
        &self,
        mode: UserMode,
        id: DbId,
        input: &UpdateBreaker,
    ) -> AppResult<CascadeOutcome> {
        let _gate = self.write_gate.lock().await;

        let parent = self.update_breaker_ungated(mode, id, input).await?;
        let state = parent.state;
        let mut outcome = CascadeOutcome {
            breaker: parent,
            children_updated: 0,
            children_failed: 0,
        };

        if !state.cascades_to_children() {
            return Ok(outcome);
        }

        let children = BreakerRepo::list_children(&self.pool, &outcome.breaker.name).await?;
        for child in children.iter().filter(|c| c.id != id) {
            let child_input = UpdateBreaker::from(child).with_state(state);
            match self.update_breaker_ungated(mode, child.id, &child_input).await {
                Ok(_) => outcome.children_updated += 1,
                Err(e) => {
                    tracing::warn!(
                        parent_id = id,
                        child_id = child.id,
                        child = %child.name,
                        error = %e,
                        "Cascade to child breaker failed",
                    );
                    outcome.children_failed += 1;
                }
            }
        }

        tracing::info!(
            breaker_id = id,
            name = %outcome.breaker.name,
            state = %state,
            children_updated = outcome.children_updated,
            children_failed = outcome.children_failed,
            "Cascade applied",
        );

        Ok(outcome)
    }
}
