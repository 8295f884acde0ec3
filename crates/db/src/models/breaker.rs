//! Breaker entity model and DTOs.

use loto_core::breaker::{normalize_ref, BreakerState};
use loto_core::lockout::LockHolding;
use loto_core::stats::BreakerFacts;
use loto_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A breaker row from the `breakers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Breaker {
    pub id: DbId,
    pub name: String,
    pub zone: String,
    pub location: String,
    #[sqlx(try_from = "String")]
    pub state: BreakerState,
    /// `key_number` of the padlock securing this breaker, if any.
    pub lock_key: Option<String>,
    /// Name (not id) of the parent breaker whose Off/Closed state cascades here.
    pub general_breaker: Option<String>,
    pub last_updated: Timestamp,
}

impl Breaker {
    /// Lock-relevant snapshot used for reconciliation diffs.
    pub fn holding(&self) -> LockHolding<'_> {
        LockHolding::new(&self.name, self.state, self.lock_key.as_deref())
    }

    /// View consumed by the stats aggregator.
    pub fn facts(&self) -> BreakerFacts<'_> {
        BreakerFacts {
            name: &self.name,
            zone: &self.zone,
            location: &self.location,
            state: self.state,
            lock_key: self.lock_key.as_deref(),
        }
    }
}

/// DTO for creating a new breaker.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBreaker {
    pub name: String,
    pub zone: String,
    pub location: String,
    /// Defaults to `Off` if omitted.
    #[serde(default)]
    pub state: BreakerState,
    pub lock_key: Option<String>,
    pub general_breaker: Option<String>,
}

impl CreateBreaker {
    /// Trim reference fields; blank references become `None`.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            zone: self.zone.trim().to_string(),
            location: self.location.trim().to_string(),
            state: self.state,
            lock_key: normalize_ref(self.lock_key.as_deref()),
            general_breaker: normalize_ref(self.general_breaker.as_deref()),
        }
    }
}

/// DTO for updating a breaker. Replaces every column, so an absent
/// `lock_key` or `general_breaker` clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBreaker {
    pub name: String,
    pub zone: String,
    pub location: String,
    pub state: BreakerState,
    pub lock_key: Option<String>,
    pub general_breaker: Option<String>,
}

impl UpdateBreaker {
    /// Trim reference fields; blank references become `None`.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            zone: self.zone.trim().to_string(),
            location: self.location.trim().to_string(),
            state: self.state,
            lock_key: normalize_ref(self.lock_key.as_deref()),
            general_breaker: normalize_ref(self.general_breaker.as_deref()),
        }
    }

    /// The same row with only `state` replaced (cascade input for a child).
    pub fn with_state(mut self, state: BreakerState) -> Self {
        self.state = state;
        self
    }
}

impl From<&Breaker> for UpdateBreaker {
    fn from(b: &Breaker) -> Self {
        Self {
            name: b.name.clone(),
            zone: b.zone.clone(),
            location: b.location.clone(),
            state: b.state,
            lock_key: b.lock_key.clone(),
            general_breaker: b.general_breaker.clone(),
        }
    }
}

/// Optional filters for listing breakers (`?zone=&location=&state=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BreakerFilter {
    pub zone: Option<String>,
    pub location: Option<String>,
    pub state: Option<BreakerState>,
}
