//! Input-source shapes the normalizer understands: field-level validation
//! failures, identity-provider error pairs, and the [`ErrorDump`] capability
//! for dumping a caught error's named facts.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// A single field-level validation failure.
///
/// `field` may be a dotted path such as `"address.city"`; consumers key
/// extension entries by the last path segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(feature = "utoipa", schema(title = "FieldViolation"))]
pub struct FieldViolation {
    /// Field path, e.g. "email" or "user.email"
    pub field: String,
    /// Human-readable message describing the validation error
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Last segment of the dotted field path, used as the extension key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.field.rsplit('.').next().unwrap_or(&self.field)
    }
}

/// An identity-provider error: a machine code plus a human description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(feature = "utoipa", schema(title = "IdentityError"))]
pub struct IdentityError {
    /// Machine-readable error code, e.g. "DuplicateEmail"
    pub code: String,
    /// Human-readable description of the error
    pub description: String,
}

impl IdentityError {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Capability for exposing a caught error's named facts to the normalizer.
///
/// Implementors list their public scalar fields as `(name, value)` string
/// pairs; a field that cannot be stringified is simply omitted. This is the
/// explicit replacement for reflective property enumeration: error types opt
/// in rather than being inspected at runtime.
pub trait ErrorDump: Display {
    /// Named facts about this error, each becoming one extension entry.
    fn fields(&self) -> Vec<(String, String)>;

    /// Captured backtrace, if the implementor recorded one.
    fn trace(&self) -> Option<String> {
        None
    }
}
