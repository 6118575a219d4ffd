//! Problem-details data model for the respkit envelope
//!
//! This crate provides pure data types with no dependencies on HTTP
//! frameworks. It includes:
//! - RFC 7807 Problem Details (`Problem`) with add-if-absent extensions
//! - The status-code → type-URI catalog used for defaulting
//! - The input-source shapes the normalizer consumes (`FieldViolation`,
//!   `IdentityError`, `ErrorDump`)

pub mod catalog;
pub mod problem;
pub mod source;

// Re-export commonly used types
pub use problem::{APPLICATION_PROBLEM_JSON, Extensions, Problem};
pub use source::{ErrorDump, FieldViolation, IdentityError};
