//! Breaker state values and field normalization.
//!
//! The database stores `state` as text constrained to the three values
//! below; [`BreakerState`] is the typed form used everywhere else.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{require_text, CoreError};

// ---------------------------------------------------------------------------
// State constants
// ---------------------------------------------------------------------------

pub const STATE_ON: &str = "On";
pub const STATE_OFF: &str = "Off";
/// Locked out: the breaker is open and physically secured with a padlock.
pub const STATE_CLOSED: &str = "Closed";

/// All valid breaker states.
pub const VALID_STATES: &[&str] = &[STATE_ON, STATE_OFF, STATE_CLOSED];

// ---------------------------------------------------------------------------
// BreakerState
// ---------------------------------------------------------------------------

/// Electrical / lockout state of a breaker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakerState {
    On,
    #[default]
    Off,
    Closed,
}

impl BreakerState {
    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::On => STATE_ON,
            Self::Off => STATE_OFF,
            Self::Closed => STATE_CLOSED,
        }
    }

    /// Whether a breaker in this state physically holds its padlock.
    pub fn holds_lock(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Whether setting a general breaker to this state propagates to the
    /// breakers that list it as their parent. Turning a parent on never
    /// re-energizes its children.
    pub fn cascades_to_children(&self) -> bool {
        matches!(self, Self::Off | Self::Closed)
    }
}

impl fmt::Display for BreakerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreakerState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATE_ON => Ok(Self::On),
            STATE_OFF => Ok(Self::Off),
            STATE_CLOSED => Ok(Self::Closed),
            _ => Err(CoreError::Validation(format!(
                "Invalid breaker state '{s}'. Must be one of: {}",
                VALID_STATES.join(", ")
            ))),
        }
    }
}

/// Used by `#[sqlx(try_from = "String")]` on row structs.
impl TryFrom<String> for BreakerState {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map_err(|e: CoreError| e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Trim an optional reference field (`lock_key`, `general_breaker`).
///
/// Blank strings collapse to `None` so an empty form field never reads as a
/// lock reference.
pub fn normalize_ref(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validate the required text fields of a breaker.
pub fn validate_breaker_fields(name: &str, zone: &str, location: &str) -> Result<(), CoreError> {
    require_text("name", name)?;
    require_text("zone", zone)?;
    require_text("location", location)
}
