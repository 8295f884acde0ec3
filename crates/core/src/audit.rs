//! History (audit trail) vocabulary.
//!
//! User modes stamped on every history row, plus the user-facing action and
//! details text written for each mutation. The text is display-only; nothing
//! parses it back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::breaker::BreakerState;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// User mode
// ---------------------------------------------------------------------------

pub const MODE_EDITOR: &str = "Editor";
pub const MODE_VISITOR: &str = "Visitor";

/// All valid user modes.
pub const VALID_MODES: &[&str] = &[MODE_EDITOR, MODE_VISITOR];

/// The two session modes. Editor may mutate, Visitor is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserMode {
    Editor,
    Visitor,
}

impl UserMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Editor => MODE_EDITOR,
            Self::Visitor => MODE_VISITOR,
        }
    }

    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Editor)
    }
}

impl fmt::Display for UserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            MODE_EDITOR => Ok(Self::Editor),
            MODE_VISITOR => Ok(Self::Visitor),
            _ => Err(CoreError::Validation(format!(
                "Invalid user mode '{s}'. Must be one of: {}",
                VALID_MODES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for UserMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map_err(|e: CoreError| e.to_string())
    }
}

// ---------------------------------------------------------------------------
// History text
// ---------------------------------------------------------------------------

/// Action line plus optional details for one history row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryText {
    pub action: String,
    pub details: Option<String>,
}

impl HistoryText {
    fn new(action: String, details: Option<String>) -> Self {
        Self { action, details }
    }
}

pub fn breaker_added(name: &str, zone: &str, location: &str, state: BreakerState) -> HistoryText {
    HistoryText::new(
        format!("Added breaker {name}"),
        Some(format!("Zone: {zone}, Location: {location}, State: {state}")),
    )
}

/// Written once per breaker update, phrased by the state the breaker ends in.
pub fn breaker_updated(name: &str, zone: &str, location: &str, state: BreakerState) -> HistoryText {
    let action = match state {
        BreakerState::Closed => format!("Breaker {name} locked"),
        BreakerState::On => format!("Breaker {name} set on"),
        BreakerState::Off => format!("Breaker {name} set off"),
    };
    HistoryText::new(action, Some(format!("({zone} - {location})")))
}

pub fn breaker_deleted(name: &str) -> HistoryText {
    HistoryText::new(format!("Deleted breaker {name}"), None)
}

pub fn lock_added(key_number: &str, zone: &str, used: bool) -> HistoryText {
    let status = if used { "In use" } else { "Available" };
    HistoryText::new(
        format!("Added lock {key_number}"),
        Some(format!("Zone: {zone}, Status: {status}")),
    )
}

pub fn lock_updated(key_number: &str, zone: &str, used: bool) -> HistoryText {
    let action = if used {
        format!("Lock {key_number} marked as in use")
    } else {
        format!("Lock {key_number} released")
    };
    HistoryText::new(action, Some(format!("Zone: {zone}")))
}

pub fn lock_deleted(key_number: &str) -> HistoryText {
    HistoryText::new(format!("Deleted lock {key_number}"), None)
}

pub fn locks_resynced(claimed: u64) -> HistoryText {
    HistoryText::new(
        "Lock usage resynchronized".to_string(),
        Some(format!("{claimed} locks marked as in use")),
    )
}

pub fn personnel_added(name: &str, lastname: &str, habilitation: Option<&str>) -> HistoryText {
    HistoryText::new(
        format!("Personnel {name} {lastname} added"),
        Some(format!("(Habilitation: {})", habilitation.unwrap_or("N/A"))),
    )
}

pub fn personnel_updated(name: &str, lastname: &str, id_card: &str) -> HistoryText {
    HistoryText::new(
        format!("Updated personnel {name} {lastname}"),
        Some(format!("ID: {id_card}")),
    )
}

pub fn personnel_deleted(name: &str, lastname: &str) -> HistoryText {
    HistoryText::new(format!("Deleted personnel {name} {lastname}"), None)
}

pub fn plan_uploaded(filename: &str, version: Option<&str>) -> HistoryText {
    match version {
        Some(v) => HistoryText::new(
            format!("Electrical plan {v} uploaded"),
            Some(format!("File: {filename}")),
        ),
        None => HistoryText::new(format!("Electrical plan {filename} uploaded"), None),
    }
}

pub fn plan_deleted(filename: &str) -> HistoryText {
    HistoryText::new(format!("Deleted electrical plan {filename}"), None)
}
