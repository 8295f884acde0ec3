//! Request extractors for the Editor / Visitor mode switch.
//!
//! - [`mode::Mode`] -- Resolves the caller's mode from the `x-access-code` header.
//! - [`mode::RequireEditor`] -- Rejects Visitor requests with 403.

pub mod mode;
