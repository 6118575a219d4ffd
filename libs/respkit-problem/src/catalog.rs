//! Status-code metadata: the status → type-URI table and default phrases
//! used when a `Problem` is built without caller-supplied descriptions.

use http::StatusCode;

/// Generic fallback for status codes the table does not cover.
pub const GENERIC_TYPE_URI: &str = "https://tools.ietf.org/html/rfc7231#section-6";

/// Type URI used for problems built from a caught error.
pub const SERVER_ERROR_TYPE_URI: &str = "https://tools.ietf.org/html/rfc7231#section-6.6.1";

/// Title used for problems built from a caught error.
pub const ERROR_REPORT_TITLE: &str = "An exception has occurred.";

/// RFC section URI classifying the given status code.
///
/// Covers the client- and server-error codes defined across RFC 7231,
/// RFC 7232, RFC 7233, RFC 7235 and RFC 6585; anything else falls back to
/// [`GENERIC_TYPE_URI`].
#[must_use]
pub fn type_uri(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "https://tools.ietf.org/html/rfc7231#section-6.5.1",
        401 => "https://tools.ietf.org/html/rfc7235#section-3.1",
        403 => "https://tools.ietf.org/html/rfc7231#section-6.5.3",
        404 => "https://tools.ietf.org/html/rfc7231#section-6.5.4",
        405 => "https://tools.ietf.org/html/rfc7231#section-6.5.5",
        406 => "https://tools.ietf.org/html/rfc7231#section-6.5.6",
        407 => "https://tools.ietf.org/html/rfc7235#section-3.2",
        408 => "https://tools.ietf.org/html/rfc7231#section-6.5.7",
        409 => "https://tools.ietf.org/html/rfc7231#section-6.5.8",
        410 => "https://tools.ietf.org/html/rfc7231#section-6.5.9",
        411 => "https://tools.ietf.org/html/rfc7231#section-6.5.10",
        412 => "https://tools.ietf.org/html/rfc7232#section-4.2",
        413 => "https://tools.ietf.org/html/rfc7231#section-6.5.11",
        414 => "https://tools.ietf.org/html/rfc7231#section-6.5.12",
        415 => "https://tools.ietf.org/html/rfc7231#section-6.5.13",
        416 => "https://tools.ietf.org/html/rfc7233#section-4.4",
        417 => "https://tools.ietf.org/html/rfc7231#section-6.5.14",
        426 => "https://tools.ietf.org/html/rfc7231#section-6.5.15",
        428 => "https://tools.ietf.org/html/rfc6585#section-3",
        429 => "https://tools.ietf.org/html/rfc6585#section-4",
        431 => "https://tools.ietf.org/html/rfc6585#section-5",
        500 => SERVER_ERROR_TYPE_URI,
        501 => "https://tools.ietf.org/html/rfc7231#section-6.6.2",
        502 => "https://tools.ietf.org/html/rfc7231#section-6.6.3",
        503 => "https://tools.ietf.org/html/rfc7231#section-6.6.4",
        504 => "https://tools.ietf.org/html/rfc7231#section-6.6.5",
        505 => "https://tools.ietf.org/html/rfc7231#section-6.6.6",
        _ => GENERIC_TYPE_URI,
    }
}

/// Canonical reason phrase for the status, e.g. `"Bad Request"` for 400.
#[must_use]
pub fn reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}

/// Default `detail` phrase naming the numeric code and its reason phrase.
#[must_use]
pub fn default_detail(status: StatusCode) -> String {
    format!(
        "The request failed with status code {} ({}).",
        status.as_u16(),
        reason(status)
    )
}
