//! Success/failure response envelopes with RFC 7807 problem normalization
//!
//! The crate provides:
//! - [`Envelope`]: the outcome wrapper handed to the render boundary
//! - The normalizer operations (`with_error`, `with_field_violations`,
//!   `with_identity_errors`, `with_error_report`, …) that fold varied
//!   error sources into one canonical problem shape
//! - Convenience `Problem` constructors and the [`ApiResult`] alias
//! - An `axum` feature rendering envelopes as HTTP responses

pub mod envelope;
pub mod normalize;
pub mod problem;
pub mod result;

#[cfg(feature = "axum")]
pub mod render;

// Re-export commonly used types
pub use envelope::{AnyEnvelope, Envelope};
pub use normalize::ProblemPatch;
pub use problem::{bad_request, conflict, finalize, internal_error, not_found};
pub use result::ApiResult;
pub use respkit_problem::{
    APPLICATION_PROBLEM_JSON, ErrorDump, Extensions, FieldViolation, IdentityError, Problem,
};
