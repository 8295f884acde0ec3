//! Dashboard figures derived from breaker rows.
//!
//! Lock usage is counted from Closed breakers with a key, never from the
//! `locks.used` flag, so the figures cannot contradict the breakers even
//! when lock rows have drifted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::breaker::BreakerState;
use crate::lockout::LockHolding;

/// Zone label for breakers stored with a blank zone.
pub const UNKNOWN_ZONE: &str = "Unknown";

/// Read-only view of the breaker fields the aggregator needs.
#[derive(Debug, Clone, Copy)]
pub struct BreakerFacts<'a> {
    pub name: &'a str,
    pub zone: &'a str,
    pub location: &'a str,
    pub state: BreakerState,
    pub lock_key: Option<&'a str>,
}

impl<'a> BreakerFacts<'a> {
    /// The key of a Closed breaker, when it has a non-blank one.
    fn locked_key(&self) -> Option<&'a str> {
        LockHolding::new(self.name, self.state, self.lock_key).held_key()
    }
}

/// Global counters shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_breakers: i64,
    pub breakers_on: i64,
    pub locked_breakers: i64,
    pub total_locks: i64,
    /// Closed breakers with a non-empty key.
    pub used_locks: i64,
    pub total_personnel: i64,
}

/// One locked breaker inside a [`ZoneGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneBreaker {
    pub name: String,
    pub location: String,
    pub lock_key: String,
}

/// Locks in use for one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneGroup {
    pub zone: String,
    pub locks_in_use: i64,
    pub breakers: Vec<ZoneBreaker>,
}

/// Compute [`Stats`] from breaker rows plus the two plain table counts.
pub fn stats_from_breakers(
    breakers: &[BreakerFacts<'_>],
    total_locks: i64,
    total_personnel: i64,
) -> Stats {
    let count = |pred: fn(&BreakerFacts<'_>) -> bool| -> i64 {
        breakers.iter().filter(|b| pred(b)).count() as i64
    };

    Stats {
        total_breakers: breakers.len() as i64,
        breakers_on: count(|b| b.state == BreakerState::On),
        locked_breakers: count(|b| b.state == BreakerState::Closed),
        total_locks,
        used_locks: count(|b| b.locked_key().is_some()),
        total_personnel,
    }
}

/// Group Closed breakers with keys by zone.
///
/// Zones are sorted lexicographically; zones without any such breaker are
/// omitted. Breakers keep their input order inside a group.
pub fn locks_by_zone(breakers: &[BreakerFacts<'_>]) -> Vec<ZoneGroup> {
    let mut zones: BTreeMap<&str, Vec<ZoneBreaker>> = BTreeMap::new();

    for breaker in breakers {
        let Some(key) = breaker.locked_key() else {
            continue;
        };
        let zone = match breaker.zone.trim() {
            "" => UNKNOWN_ZONE,
            z => z,
        };
        zones.entry(zone).or_default().push(ZoneBreaker {
            name: breaker.name.to_string(),
            location: breaker.location.to_string(),
            lock_key: key.to_string(),
        });
    }

    zones
        .into_iter()
        .map(|(zone, breakers)| ZoneGroup {
            zone: zone.to_string(),
            locks_in_use: breakers.len() as i64,
            breakers,
        })
        .collect()
}
