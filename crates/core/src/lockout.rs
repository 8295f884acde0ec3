//! Lock reconciliation planning.
//!
//! A lock row is "in use" exactly when some Closed breaker references its
//! `key_number`. Every breaker mutation is diffed here against its
//! pre-mutation snapshot to produce the compensating lock writes, in the
//! order they must be applied. The functions are pure; the service layer
//! reads the snapshots and applies the resulting [`LockChange`]s.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::breaker::BreakerState;

// ---------------------------------------------------------------------------
// Inputs / outputs
// ---------------------------------------------------------------------------

/// The lock-relevant fields of one breaker row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockHolding<'a> {
    pub breaker_name: &'a str,
    pub state: BreakerState,
    pub lock_key: Option<&'a str>,
}

impl<'a> LockHolding<'a> {
    pub fn new(breaker_name: &'a str, state: BreakerState, lock_key: Option<&'a str>) -> Self {
        Self {
            breaker_name,
            state,
            lock_key,
        }
    }

    /// The key this breaker references, whatever its state.
    pub fn referenced_key(&self) -> Option<&'a str> {
        self.lock_key.map(str::trim).filter(|k| !k.is_empty())
    }

    /// The key this breaker physically holds, if any.
    ///
    /// Only a Closed breaker with a non-blank key holds its lock.
    pub fn held_key(&self) -> Option<&'a str> {
        if !self.state.holds_lock() {
            return None;
        }
        self.referenced_key()
    }
}

/// A single compensating write against the `locks` table, addressed by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockChange {
    /// `used = false, assigned_to = NULL`.
    Release { key: String },
    /// `used = true, assigned_to = <breaker name>`.
    Claim { key: String, assigned_to: String },
}

impl LockChange {
    pub fn key(&self) -> &str {
        match self {
            Self::Release { key } | Self::Claim { key, .. } => key,
        }
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Lock writes for a newly inserted breaker.
pub fn plan_create(new: &LockHolding<'_>) -> Vec<LockChange> {
    new.held_key()
        .map(|key| claim(key, new.breaker_name))
        .into_iter()
        .collect()
}

/// Lock writes for a breaker update, diffing the pre-update snapshot `old`
/// against the row as written `new`.
///
/// The old key is released when the key reference changed, whatever the
/// old state, or when the breaker left Closed while keeping the same key.
/// The new key is claimed whenever the new row holds one, which also
/// re-labels `assigned_to` after a rename. Releases precede claims.
///
/// A key change on a breaker that was not Closed still releases its old
/// key, even if another Closed breaker holds it; `lock_drift` reports that
/// case and a resync repairs it.
pub fn plan_update(old: &LockHolding<'_>, new: &LockHolding<'_>) -> Vec<LockChange> {
    let mut changes = Vec::with_capacity(2);
    let new_key = new.held_key();

    if let Some(old_key) = old.referenced_key() {
        let key_changed = new.referenced_key() != Some(old_key);
        let left_closed = old.held_key().is_some() && new_key.is_none();
        if key_changed || left_closed {
            changes.push(LockChange::Release {
                key: old_key.to_string(),
            });
        }
    }

    if let Some(key) = new_key {
        changes.push(claim(key, new.breaker_name));
    }

    changes
}

/// Lock writes to apply before a breaker row is deleted.
pub fn plan_delete(old: &LockHolding<'_>) -> Vec<LockChange> {
    old.held_key()
        .map(|key| LockChange::Release {
            key: key.to_string(),
        })
        .into_iter()
        .collect()
}

/// Claims that rebuild the lock table from breaker rows alone.
///
/// The caller releases every lock first, then applies these claims in
/// order. When two Closed breakers reference the same key the later one in
/// iteration order wins, matching the live last-write-wins behaviour.
pub fn plan_resync<'a, I>(breakers: I) -> Vec<LockChange>
where
    I: IntoIterator<Item = LockHolding<'a>>,
{
    breakers
        .into_iter()
        .filter_map(|b| b.held_key().map(|key| claim(key, b.breaker_name)))
        .collect()
}

fn claim(key: &str, breaker_name: &str) -> LockChange {
    LockChange::Claim {
        key: key.to_string(),
        assigned_to: breaker_name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Drift detection
// ---------------------------------------------------------------------------

/// The usage fields of one lock row as currently stored.
#[derive(Debug, Clone, Copy)]
pub struct LockRowView<'a> {
    pub key_number: &'a str,
    pub used: bool,
    pub assigned_to: Option<&'a str>,
}

/// A lock row whose stored usage disagrees with the breaker table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockDrift {
    pub key_number: String,
    pub expected_used: bool,
    pub expected_assigned_to: Option<String>,
    pub actual_used: bool,
    pub actual_assigned_to: Option<String>,
}

/// Compare stored lock rows with the state a resync would produce.
///
/// `claims` is the output of [`plan_resync`]. Keys claimed by breakers but
/// absent from `locks` are unresolved references, not drift, and are
/// skipped.
pub fn lock_drift(locks: &[LockRowView<'_>], claims: &[LockChange]) -> Vec<LockDrift> {
    let mut expected: BTreeMap<&str, &str> = BTreeMap::new();
    for change in claims {
        if let LockChange::Claim { key, assigned_to } = change {
            expected.insert(key.as_str(), assigned_to.as_str());
        }
    }

    locks
        .iter()
        .filter_map(|lock| {
            let expected_to = expected.get(lock.key_number).copied();
            let expected_used = expected_to.is_some();
            let actual_to = if lock.used { lock.assigned_to } else { None };

            // A released lock must also have a cleared assignee.
            let consistent = lock.used == expected_used
                && actual_to == expected_to
                && (lock.used || lock.assigned_to.is_none());
            if consistent {
                return None;
            }

            Some(LockDrift {
                key_number: lock.key_number.to_string(),
                expected_used,
                expected_assigned_to: expected_to.map(str::to_string),
                actual_used: lock.used,
                actual_assigned_to: lock.assigned_to.map(str::to_string),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed<'a>(name: &'a str, key: &'a str) -> LockHolding<'a> {
        LockHolding::new(name, BreakerState::Closed, Some(key))
    }

    fn release(key: &str) -> LockChange {
        LockChange::Release {
            key: key.to_string(),
        }
    }

    // -----------------------------------------------------------------------
    // held_key
    // -----------------------------------------------------------------------

    #[test]
    fn off_breaker_holds_nothing() {
        let b = LockHolding::new("B1", BreakerState::Off, Some("K001"));
        assert_eq!(b.held_key(), None);
    }

    #[test]
    fn blank_key_is_not_held() {
        let b = LockHolding::new("B1", BreakerState::Closed, Some("  "));
        assert_eq!(b.held_key(), None);
    }

    // -----------------------------------------------------------------------
    // create / delete
    // -----------------------------------------------------------------------

    #[test]
    fn create_closed_with_key_claims() {
        let changes = plan_create(&closed("B1", "K001"));
        assert_eq!(changes, vec![claim("K001", "B1")]);
    }

    #[test]
    fn create_on_with_key_claims_nothing() {
        let b = LockHolding::new("B1", BreakerState::On, Some("K001"));
        assert!(plan_create(&b).is_empty());
    }

    #[test]
    fn delete_closed_releases() {
        assert_eq!(plan_delete(&closed("B1", "K001")), vec![release("K001")]);
    }

    #[test]
    fn delete_off_releases_nothing() {
        let b = LockHolding::new("B1", BreakerState::Off, Some("K001"));
        assert!(plan_delete(&b).is_empty());
    }

    // -----------------------------------------------------------------------
    // update
    // -----------------------------------------------------------------------

    #[test]
    fn closed_to_off_releases_key() {
        let old = closed("B1", "K001");
        let new = LockHolding::new("B1", BreakerState::Off, Some("K001"));
        assert_eq!(plan_update(&old, &new), vec![release("K001")]);
    }

    #[test]
    fn key_change_releases_old_then_claims_new() {
        let old = closed("B1", "K001");
        let new = closed("B1", "K002");
        assert_eq!(
            plan_update(&old, &new),
            vec![release("K001"), claim("K002", "B1")]
        );
    }

    #[test]
    fn unchanged_closed_breaker_reclaims_same_key() {
        let old = closed("B1", "K001");
        let new = closed("B1", "K001");
        assert_eq!(plan_update(&old, &new), vec![claim("K001", "B1")]);
    }

    #[test]
    fn rename_relabels_lock() {
        let old = closed("Old Name", "K001");
        let new = closed("New Name", "K001");
        assert_eq!(plan_update(&old, &new), vec![claim("K001", "New Name")]);
    }

    #[test]
    fn off_to_closed_claims_without_release() {
        let old = LockHolding::new("B1", BreakerState::Off, Some("K001"));
        let new = closed("B1", "K001");
        assert_eq!(plan_update(&old, &new), vec![claim("K001", "B1")]);
    }

    #[test]
    fn key_change_on_unlocked_breaker_releases_old_key() {
        let old = LockHolding::new("B1", BreakerState::Off, Some("K001"));
        let new = LockHolding::new("B1", BreakerState::Off, Some("K002"));
        assert_eq!(plan_update(&old, &new), vec![release("K001")]);
    }

    #[test]
    fn unlocked_breaker_keeping_its_key_touches_nothing() {
        let old = LockHolding::new("B1", BreakerState::Off, Some("K001"));
        let new = LockHolding::new("B1", BreakerState::On, Some("K001"));
        assert!(plan_update(&old, &new).is_empty());
    }

    #[test]
    fn key_comparison_ignores_surrounding_whitespace() {
        let old = LockHolding::new("B1", BreakerState::Off, Some("K001"));
        let new = LockHolding::new("B1", BreakerState::Off, Some(" K001 "));
        assert!(plan_update(&old, &new).is_empty());
    }

    #[test]
    fn removing_key_from_closed_breaker_releases() {
        let old = closed("B1", "K001");
        let new = LockHolding::new("B1", BreakerState::Closed, None);
        assert_eq!(plan_update(&old, &new), vec![release("K001")]);
    }

    // -----------------------------------------------------------------------
    // resync
    // -----------------------------------------------------------------------

    #[test]
    fn resync_claims_only_closed_breakers_with_keys() {
        let breakers = vec![
            closed("A-1-01", "K001"),
            LockHolding::new("A-1-02", BreakerState::Off, Some("K002")),
            LockHolding::new("Main", BreakerState::On, None),
            closed("B-01", "K005"),
        ];
        let claims = plan_resync(breakers);
        assert_eq!(
            claims,
            vec![claim("K001", "A-1-01"), claim("K005", "B-01")]
        );
    }

    #[test]
    fn resync_plan_is_deterministic() {
        let breakers = vec![closed("A", "K1"), closed("B", "K2")];
        assert_eq!(plan_resync(breakers.clone()), plan_resync(breakers));
    }

    // -----------------------------------------------------------------------
    // drift
    // -----------------------------------------------------------------------

    #[test]
    fn consistent_table_has_no_drift() {
        let claims = plan_resync(vec![closed("B1", "K001")]);
        let locks = [
            LockRowView {
                key_number: "K001",
                used: true,
                assigned_to: Some("B1"),
            },
            LockRowView {
                key_number: "K002",
                used: false,
                assigned_to: None,
            },
        ];
        assert!(lock_drift(&locks, &claims).is_empty());
    }

    #[test]
    fn stale_used_flag_is_reported() {
        let claims = plan_resync(Vec::new());
        let locks = [LockRowView {
            key_number: "K003",
            used: true,
            assigned_to: Some("Gone"),
        }];
        let drift = lock_drift(&locks, &claims);
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].key_number, "K003");
        assert!(!drift[0].expected_used);
        assert!(drift[0].actual_used);
    }

    #[test]
    fn wrong_assignee_is_reported() {
        let claims = plan_resync(vec![closed("B2", "K001")]);
        let locks = [LockRowView {
            key_number: "K001",
            used: true,
            assigned_to: Some("B1"),
        }];
        let drift = lock_drift(&locks, &claims);
        assert_eq!(drift[0].expected_assigned_to.as_deref(), Some("B2"));
        assert_eq!(drift[0].actual_assigned_to.as_deref(), Some("B1"));
    }

    #[test]
    fn unresolved_claim_is_not_drift() {
        let claims = plan_resync(vec![closed("B1", "K999")]);
        assert!(lock_drift(&[], &claims).is_empty());
    }
}
