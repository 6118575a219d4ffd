//! The problem normalizer: fluent operations that build or merge a
//! [`Problem`] on an [`Envelope`] from heterogeneous error sources.
//!
//! Merge discipline, applied across a whole chain of calls: extension keys
//! are add-if-absent (the first call to introduce a key wins), while the
//! descriptive fields `type`/`title`/`detail`/`status`/`instance` are
//! overwritable by every later call. Every operation tolerates an envelope
//! that has no problem yet and auto-initializes one from the defaults.

use http::StatusCode;
use serde_json::{Map, Value, json};

use respkit_problem::{ErrorDump, Extensions, FieldViolation, IdentityError, Problem, catalog};

use crate::envelope::Envelope;

/// Caller-supplied overrides for the descriptive problem fields, plus
/// extensions to merge. `None` means "keep the existing/default value".
#[derive(Debug, Clone, Default)]
pub struct ProblemPatch {
    pub type_url: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
    pub status: Option<StatusCode>,
    pub instance: Option<String>,
    pub extensions: Extensions,
}

impl<T> Envelope<T> {
    /// Problem to enrich, auto-initialized from the envelope status (or 400
    /// when unset) on first use. Back-fills a missing envelope status from
    /// the seeded problem.
    fn ensure_problem(&mut self) -> &mut Problem {
        let seed = self.status_code.unwrap_or(StatusCode::BAD_REQUEST);
        let problem = self.problem.get_or_insert_with(|| Problem::for_status(seed));
        if self.status_code.is_none() {
            self.status_code = problem.status;
        }
        problem
    }

    /// Reset the problem's descriptive fields to their status-derived
    /// defaults. Extensions already accumulated are kept.
    pub fn with_default_problem(mut self) -> Self {
        let status = self.status_code.unwrap_or(StatusCode::BAD_REQUEST);
        let extensions = self
            .problem
            .take()
            .map(|p| p.extensions)
            .unwrap_or_default();
        let mut problem = Problem::for_status(status);
        problem.extensions = extensions;
        self.status_code = Some(status);
        self.problem = Some(problem);
        self
    }

    /// Apply caller-supplied descriptive fields and merge extensions.
    ///
    /// Descriptive fields in the patch overwrite; a patch status is an
    /// explicit write and also moves the envelope status. Patch extensions
    /// merge add-if-absent.
    pub fn with_custom_problem(mut self, patch: ProblemPatch) -> Self {
        let status = patch.status;
        {
            let p = self.ensure_problem();
            if let Some(v) = patch.type_url {
                p.type_url = v;
            }
            if let Some(v) = patch.title {
                p.title = v;
            }
            if let Some(v) = patch.detail {
                p.detail = v;
            }
            if let Some(v) = status {
                p.status = Some(v);
            }
            if let Some(v) = patch.instance {
                p.instance = Some(v);
            }
            p.merge_extensions(patch.extensions);
        }
        if let Some(v) = status {
            self.status_code = Some(v);
        }
        self
    }

    /// Add one extension entry: `key` → `[message]`, add-if-absent.
    pub fn with_error(self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.with_error_messages(key, [message.into()])
    }

    /// Add one extension entry carrying several messages, add-if-absent.
    pub fn with_error_messages<I, M>(mut self, key: impl Into<String>, messages: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let values: Vec<Value> = messages
            .into_iter()
            .map(|m| Value::String(m.into()))
            .collect();
        self.ensure_problem().insert_extension(key, Value::Array(values));
        self
    }

    /// Add the same message under each of the given keys, add-if-absent
    /// per key.
    pub fn with_error_for_each<I, K>(mut self, keys: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let message = message.into();
        let problem = self.ensure_problem();
        for key in keys {
            problem.insert_extension(key, json!([message.clone()]));
        }
        self
    }

    /// Zip `keys` with `messages` positionally and add each pair,
    /// add-if-absent per key. Surplus entries on either side are ignored.
    pub fn with_error_pairs<I, K, J, M>(mut self, keys: I, messages: J) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
        J: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let problem = self.ensure_problem();
        for (key, message) in keys.into_iter().zip(messages) {
            problem.insert_extension(key, json!([message.into()]));
        }
        self
    }

    /// Normalize field-level validation failures. The extension key is the
    /// last segment of the dotted field path; the first message seen for a
    /// key wins, later ones for the same key are dropped.
    pub fn with_field_violations<I>(mut self, violations: I) -> Self
    where
        I: IntoIterator<Item = FieldViolation>,
    {
        let problem = self.ensure_problem();
        for violation in violations {
            let key = violation.key().to_owned();
            problem.insert_extension(key, json!([violation.message]));
        }
        self
    }

    /// Normalize identity-provider errors: each `code` becomes an extension
    /// key with `[description]` as its value, add-if-absent.
    pub fn with_identity_errors<I>(mut self, errors: I) -> Self
    where
        I: IntoIterator<Item = IdentityError>,
    {
        let problem = self.ensure_problem();
        for error in errors {
            problem.insert_extension(error.code, json!([error.description]));
        }
        self
    }

    /// Normalize a caught error. Each named fact becomes a single-element
    /// extension array; `type` and `title` take the fixed server-error
    /// values, `detail` the structured JSON serialization of the report,
    /// and the status moves to the envelope's current status (500 when
    /// unset). `instance` is set from `request_path` when supplied; a
    /// backtrace from [`ErrorDump::trace`] is recorded under the `"trace"`
    /// extension key instead of being conflated with `instance`.
    pub fn with_error_report<E>(mut self, source: &E, request_path: Option<&str>) -> Self
    where
        E: ErrorDump + ?Sized,
    {
        let status = self
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::error!(error = %source, status = %status, "normalizing caught error into problem");

        let fields = source.fields();
        let report = json!({
            "message": source.to_string(),
            "fields": fields
                .iter()
                .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                .collect::<Map<String, Value>>(),
        });

        {
            let p = self.ensure_problem();
            p.type_url = catalog::SERVER_ERROR_TYPE_URI.to_owned();
            p.title = catalog::ERROR_REPORT_TITLE.to_owned();
            p.detail = report.to_string();
            p.status = Some(status);
            if let Some(path) = request_path {
                p.instance = Some(path.to_owned());
            }
            for (name, value) in fields {
                p.insert_extension(name, json!([value]));
            }
            if let Some(trace) = source.trace() {
                p.insert_extension("trace", Value::String(trace));
            }
        }
        self.status_code = Some(status);
        self
    }
}
