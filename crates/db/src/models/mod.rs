//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` input DTOs for inserts and full-replacement updates
//! - Filter structs for list queries where the table supports them

pub mod breaker;
pub mod history;
pub mod lock;
pub mod personnel;
pub mod plan;
pub mod settings;
