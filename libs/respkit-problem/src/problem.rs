//! RFC 7807 Problem Details for HTTP APIs (pure data model, no HTTP framework dependencies)

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::catalog;

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// Content type for Problem Details as per RFC 7807.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Open bag of additional named error facts attached to a [`Problem`].
///
/// Values are typically JSON arrays of message strings, keyed by field name
/// or error code, but arbitrary values are allowed for custom use.
pub type Extensions = Map<String, Value>;

fn serialize_opt_status<S>(status: &Option<StatusCode>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match status {
        Some(code) => serializer.serialize_some(&code.as_u16()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_opt_status<'de, D>(deserializer: D) -> Result<Option<StatusCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let code: Option<u16> = Option::deserialize(deserializer)?;
    code.map(|c| StatusCode::from_u16(c).map_err(serde::de::Error::custom))
        .transpose()
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// Merge discipline: the descriptive fields (`type`, `title`, `detail`,
/// `status`, `instance`) are overwritable, last write wins. `extensions`
/// entries are strictly add-if-absent; an existing key is never replaced by
/// [`Problem::add_extension`] or [`Problem::merge_extensions`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(
    feature = "utoipa",
    schema(title = "Problem", description = "RFC 7807 Problem Details for HTTP APIs")
)]
#[must_use]
pub struct Problem {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// A human-readable explanation specific to this occurrence of the problem.
    pub detail: String,
    /// The HTTP status code for this occurrence of the problem.
    /// Serializes as u16 for RFC 7807 compatibility.
    #[serde(
        default,
        serialize_with = "serialize_opt_status",
        deserialize_with = "deserialize_opt_status"
    )]
    #[cfg_attr(feature = "utoipa", schema(value_type = Option<u16>))]
    pub status: Option<StatusCode>,
    /// A URI reference that identifies the specific occurrence of the problem.
    /// Populated from the request path when available, never guessed.
    #[serde(default)]
    pub instance: Option<String>,
    /// Additional named error facts, keyed by field name or error code.
    #[serde(default)]
    #[cfg_attr(feature = "utoipa", schema(value_type = Object))]
    pub extensions: Extensions,
}

impl Problem {
    /// Create a new Problem with the given status, title and detail.
    ///
    /// The `type` URI is seeded from the status catalog; use
    /// [`Problem::with_type`] to override it.
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: catalog::type_uri(status).to_owned(),
            title: title.into(),
            detail: detail.into(),
            status: Some(status),
            instance: None,
            extensions: Extensions::new(),
        }
    }

    /// Fully defaulted Problem for the given status code: `type` from the
    /// catalog, `title` the canonical reason phrase, `detail` a generic
    /// phrase naming the code, no `instance`, empty `extensions`.
    pub fn for_status(status: StatusCode) -> Self {
        Self::new(status, catalog::reason(status), catalog::default_detail(status))
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = type_url.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = Some(uri.into());
        self
    }

    /// Builder form of [`Problem::insert_extension`].
    pub fn add_extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert_extension(key, value);
        self
    }

    /// Insert `key` only if absent. Returns `true` when the entry was added,
    /// `false` when an existing entry was kept.
    pub fn insert_extension(&mut self, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if self.extensions.contains_key(&key) {
            return false;
        }
        self.extensions.insert(key, value);
        true
    }

    /// Merge every entry of `other` into `extensions`, add-if-absent per key.
    pub fn merge_extensions(&mut self, other: Extensions) {
        for (key, value) in other {
            self.insert_extension(key, value);
        }
    }
}

/// Axum integration: make Problem directly usable as a response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Problem {
    fn into_response(self) -> axum::response::Response {
        use axum::http::HeaderValue;

        let status = self.status.unwrap_or(StatusCode::BAD_REQUEST);
        if status.is_server_error() {
            tracing::error!(status = %status, title = %self.title, "returning problem response");
        }
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}
