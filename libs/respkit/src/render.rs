//! Axum integration: render an [`Envelope`] as an HTTP response.
//!
//! Success renders the payload as a JSON body under the resolved status;
//! failure renders the problem (synthesizing a default one when the
//! envelope carries none) as `application/problem+json`.

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

use respkit_problem::Problem;

use crate::envelope::Envelope;

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = self.resolved_status();
        if self.succeeded {
            (status, axum::Json(self.data)).into_response()
        } else {
            tracing::warn!(status = %status, "rendering failure envelope");
            let mut problem = self.problem.unwrap_or_else(|| Problem::for_status(status));
            if problem.status.is_none() || self.status_code.is_some() {
                problem.status = Some(status);
            }
            problem.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use respkit_problem::APPLICATION_PROBLEM_JSON;

    fn content_type(resp: &Response) -> &str {
        resp.headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    #[test]
    fn success_renders_resolved_status_and_json_body() {
        let resp = Envelope::success("hello").into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(content_type(&resp).starts_with("application/json"));
    }

    #[test]
    fn failure_renders_problem_with_problem_content_type() {
        let resp = Envelope::<()>::failure().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(content_type(&resp), APPLICATION_PROBLEM_JSON);
    }

    #[test]
    fn failure_without_problem_synthesizes_one() {
        let env = Envelope::<()> {
            succeeded: false,
            status_code: Some(StatusCode::SERVICE_UNAVAILABLE),
            data: None,
            problem: None,
        };
        let resp = env.into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(content_type(&resp), APPLICATION_PROBLEM_JSON);
    }

    #[test]
    fn envelope_status_overrides_stale_problem_status() {
        let env = Envelope::<()>::failure_with_status(StatusCode::NOT_FOUND)
            .with_status(StatusCode::GONE);
        let resp = env.into_response();
        assert_eq!(resp.status(), StatusCode::GONE);
    }
}
