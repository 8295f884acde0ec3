//! Editor / Visitor mode resolution from the shared access code.
//!
//! This is a mode switch, not an authentication scheme: one code shared by
//! everyone allowed to edit.

use crate::audit::UserMode;
use crate::error::CoreError;

/// Access code seeded by the initial migration.
pub const DEFAULT_ACCESS_CODE: &str = "010203";

/// Resolve the mode for a request.
///
/// No code means Visitor; the right code means Editor; a wrong code is
/// rejected rather than silently downgraded.
pub fn resolve_mode(supplied: Option<&str>, expected: &str) -> Result<UserMode, CoreError> {
    match supplied.map(str::trim) {
        None | Some("") => Ok(UserMode::Visitor),
        Some(code) if code == expected => Ok(UserMode::Editor),
        Some(_) => Err(CoreError::Unauthorized("Invalid access code".into())),
    }
}

/// Reject mutations from Visitor mode.
pub fn require_editor(mode: UserMode) -> Result<(), CoreError> {
    if mode.can_edit() {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Editor mode required".into()))
    }
}

/// Validate a new access code before it is persisted.
pub fn validate_access_code(code: &str) -> Result<(), CoreError> {
    if code.trim().is_empty() {
        return Err(CoreError::Validation("Access code must not be empty".into()));
    }
    if code.trim() != code {
        return Err(CoreError::Validation(
            "Access code must not start or end with whitespace".into(),
        ));
    }
    Ok(())
}
