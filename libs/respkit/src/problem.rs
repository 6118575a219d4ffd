//! Re-exports and convenience constructors for Problem types

use http::StatusCode;

pub use respkit_problem::{APPLICATION_PROBLEM_JSON, Problem};

use crate::envelope::Envelope;

// Optional convenience constructors that return `Problem` directly
pub fn bad_request(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::BAD_REQUEST, "Bad Request", detail)
}

pub fn not_found(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::NOT_FOUND, "Not Found", detail)
}

pub fn conflict(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::CONFLICT, "Conflict", detail)
}

pub fn internal_error(detail: impl Into<String>) -> Problem {
    Problem::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        detail,
    )
}

/// Attach the request path as the problem `instance` just before the
/// envelope crosses the render boundary. A success envelope without a
/// problem passes through untouched; the path is never guessed.
pub fn finalize<T>(mut envelope: Envelope<T>, request_path: &str) -> Envelope<T> {
    if let Some(problem) = envelope.problem.as_mut() {
        problem.instance = Some(request_path.to_owned());
    }
    envelope
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convenience_constructors() {
        let bad_req = bad_request("Invalid input");
        assert_eq!(bad_req.status, Some(StatusCode::BAD_REQUEST));
        assert_eq!(bad_req.title, "Bad Request");

        let not_found_resp = not_found("User not found");
        assert_eq!(not_found_resp.status, Some(StatusCode::NOT_FOUND));
        assert_eq!(not_found_resp.title, "Not Found");

        let conflict_resp = conflict("Email already exists");
        assert_eq!(conflict_resp.status, Some(StatusCode::CONFLICT));
        assert_eq!(conflict_resp.title, "Conflict");

        let internal_resp = internal_error("Database connection failed");
        assert_eq!(internal_resp.status, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(internal_resp.title, "Internal Server Error");
    }

    #[test]
    fn finalize_sets_instance_on_the_problem() {
        let env = finalize(Envelope::<()>::failure(), "/users/123");
        assert_eq!(
            env.problem.and_then(|p| p.instance),
            Some("/users/123".to_owned())
        );
    }

    #[test]
    fn finalize_leaves_success_envelopes_alone() {
        let env = finalize(Envelope::success(1), "/users/123");
        assert!(env.problem.is_none());
    }
}
