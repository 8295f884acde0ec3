//! Domain logic for lockout/tagout tracking.
//!
//! No database dependencies: everything here operates on values loaded and
//! persisted by `loto-db` and orchestrated by `loto-api`.

pub mod access;
pub mod audit;
pub mod breaker;
pub mod error;
pub mod lockout;
pub mod stats;
pub mod types;
