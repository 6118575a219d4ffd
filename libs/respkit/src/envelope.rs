//! The outcome envelope: a success/failure wrapper around an optional
//! payload and an optional RFC 7807 problem description.

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use respkit_problem::Problem;

/// Success/failure wrapper returned by an operation, generic over the
/// payload type.
///
/// The envelope owns its [`Problem`] exclusively; it is created once by a
/// factory and enriched in place through the normalizer operations until it
/// is handed to the render boundary.
///
/// `status_code` and `problem.status` are kept consistent: factories and
/// enrichment operations back-fill whichever side is missing. When both are
/// set and disagree, the envelope's own `status_code` wins at resolution
/// time (last writer on the envelope takes precedence over a value seeded
/// into the problem).
#[derive(Debug, Clone)]
#[must_use]
pub struct Envelope<T> {
    /// Whether the operation succeeded. Set at construction.
    pub succeeded: bool,
    /// Explicit HTTP status; resolved lazily when absent, see
    /// [`Envelope::resolved_status`].
    pub status_code: Option<StatusCode>,
    /// Payload, present on success paths in normal use.
    pub data: Option<T>,
    /// Structured failure description, absent for pure success envelopes.
    pub problem: Option<Problem>,
}

/// The untyped envelope variant, carrying an arbitrary JSON payload.
pub type AnyEnvelope = Envelope<serde_json::Value>;

impl<T> Envelope<T> {
    /// Successful outcome carrying `data`, status 200.
    pub fn success(data: T) -> Self {
        Self::success_with_status(data, StatusCode::OK)
    }

    /// Successful outcome with an explicit status code.
    pub fn success_with_status(data: T, status: StatusCode) -> Self {
        Self {
            succeeded: true,
            status_code: Some(status),
            data: Some(data),
            problem: None,
        }
    }

    /// Failed outcome with a defaulted problem, status 400.
    pub fn failure() -> Self {
        Self::failure_with_status(StatusCode::BAD_REQUEST)
    }

    /// Failed outcome with an explicit status code; the synthesized problem
    /// is seeded from the same status.
    pub fn failure_with_status(status: StatusCode) -> Self {
        Self {
            succeeded: false,
            status_code: Some(status),
            data: None,
            problem: Some(Problem::for_status(status)),
        }
    }

    /// Failed outcome wrapping a caller-built problem. The envelope status
    /// comes from `problem.status`, or 400 when the problem carries none;
    /// the resolved value is mirrored back onto the problem.
    pub fn failure_with(mut problem: Problem) -> Self {
        let status = problem.status.unwrap_or(StatusCode::BAD_REQUEST);
        problem.status = Some(status);
        Self {
            succeeded: false,
            status_code: Some(status),
            data: None,
            problem: Some(problem),
        }
    }

    /// General constructor. A missing `status_code` is resolved from
    /// `problem.status`, else defaults to 200; the resolved value is
    /// mirrored onto a problem that carries no status of its own.
    pub fn create(
        succeeded: bool,
        status_code: Option<StatusCode>,
        data: Option<T>,
        mut problem: Option<Problem>,
    ) -> Self {
        let resolved = status_code
            .or_else(|| problem.as_ref().and_then(|p| p.status))
            .unwrap_or(StatusCode::OK);
        if let Some(p) = problem.as_mut() {
            if p.status.is_none() {
                p.status = Some(resolved);
            }
        }
        Self {
            succeeded,
            status_code: Some(resolved),
            data,
            problem,
        }
    }

    /// Overwrite the envelope status. A problem that carries no status is
    /// back-filled; a problem status set earlier is left as-is and simply
    /// loses at resolution time.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status_code = Some(status);
        if let Some(p) = self.problem.as_mut() {
            if p.status.is_none() {
                p.status = Some(status);
            }
        }
        self
    }

    /// The status this envelope renders with: the explicit `status_code` if
    /// set, else the problem's status, else 200 for success / 400 for
    /// failure.
    #[must_use]
    pub fn resolved_status(&self) -> StatusCode {
        self.status_code
            .or_else(|| self.problem.as_ref().and_then(|p| p.status))
            .unwrap_or(if self.succeeded {
                StatusCode::OK
            } else {
                StatusCode::BAD_REQUEST
            })
    }
}

impl<T: Serialize> Envelope<T> {
    /// Erase the payload type, carrying the payload over as JSON. A payload
    /// that fails to serialize is silently dropped; this never fails.
    pub fn into_any(self) -> AnyEnvelope {
        Envelope {
            succeeded: self.succeeded,
            status_code: self.status_code,
            data: self.data.and_then(|d| serde_json::to_value(d).ok()),
            problem: self.problem,
        }
    }

    /// Re-type the payload. `succeeded`, `status_code` and `problem` are
    /// copied verbatim; the payload is carried over only when it round-trips
    /// into `U`, else the target payload is left empty. This is a cast, not
    /// a transformation, and never fails.
    pub fn convert<U: DeserializeOwned>(self) -> Envelope<U> {
        Envelope {
            succeeded: self.succeeded,
            status_code: self.status_code,
            data: self
                .data
                .and_then(|d| serde_json::to_value(d).ok())
                .and_then(|v| serde_json::from_value(v).ok()),
            problem: self.problem,
        }
    }
}

// The wire shape is `{ succeeded, statusCode, data, problemDetails }` with
// statusCode emitted resolved, hence the manual impl.
impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Envelope", 4)?;
        state.serialize_field("succeeded", &self.succeeded)?;
        state.serialize_field("statusCode", &self.resolved_status().as_u16())?;
        state.serialize_field("data", &self.data)?;
        state.serialize_field("problemDetails", &self.problem)?;
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct EnvelopeWire<T> {
    succeeded: bool,
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    problem_details: Option<Problem>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Envelope<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = EnvelopeWire::<T>::deserialize(deserializer)?;
        let status_code = wire
            .status_code
            .map(StatusCode::from_u16)
            .transpose()
            .map_err(serde::de::Error::custom)?;
        Ok(Self {
            succeeded: wire.succeeded,
            status_code,
            data: wire.data,
            problem: wire.problem_details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_defaults_to_200() {
        let env = Envelope::success("payload");
        assert!(env.succeeded);
        assert_eq!(env.resolved_status(), StatusCode::OK);
        assert_eq!(env.data.as_deref(), Some("payload"));
        assert!(env.problem.is_none());
    }

    #[test]
    fn failure_defaults_to_400_with_matching_problem() {
        let env = Envelope::<()>::failure();
        assert!(!env.succeeded);
        assert_eq!(env.resolved_status(), StatusCode::BAD_REQUEST);
        let problem = env.problem.expect("failure synthesizes a problem");
        assert_eq!(problem.status, Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn failure_status_always_matches_problem_status() {
        for code in [403u16, 404, 409, 422, 500, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            let env = Envelope::<()>::failure_with_status(status);
            assert_eq!(env.resolved_status(), status);
            assert_eq!(env.problem.as_ref().and_then(|p| p.status), Some(status));
        }
    }

    #[test]
    fn failure_with_inherits_problem_status() {
        let env = Envelope::<()>::failure_with(Problem::for_status(StatusCode::NOT_FOUND));
        assert_eq!(env.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn failure_with_backfills_missing_problem_status() {
        let mut problem = Problem::for_status(StatusCode::NOT_FOUND);
        problem.status = None;
        let env = Envelope::<()>::failure_with(problem);
        assert_eq!(env.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            env.problem.and_then(|p| p.status),
            Some(StatusCode::BAD_REQUEST)
        );
    }

    #[test]
    fn create_resolves_status_from_problem_then_defaults() {
        let env = Envelope::<()>::create(
            false,
            None,
            None,
            Some(Problem::for_status(StatusCode::CONFLICT)),
        );
        assert_eq!(env.status_code, Some(StatusCode::CONFLICT));

        let env = Envelope::create(true, None, Some(1), None);
        assert_eq!(env.status_code, Some(StatusCode::OK));
    }

    #[test]
    fn create_mirrors_resolved_status_onto_problem() {
        let mut problem = Problem::for_status(StatusCode::GONE);
        problem.status = None;
        let env = Envelope::<()>::create(false, Some(StatusCode::FORBIDDEN), None, Some(problem));
        assert_eq!(
            env.problem.and_then(|p| p.status),
            Some(StatusCode::FORBIDDEN)
        );
    }

    #[test]
    fn explicit_envelope_status_wins_over_problem_status() {
        let env =
            Envelope::<()>::failure_with_status(StatusCode::NOT_FOUND).with_status(StatusCode::GONE);
        assert_eq!(env.resolved_status(), StatusCode::GONE);
    }

    #[test]
    fn convert_drops_mismatched_payload() {
        let env = Envelope::success("x".to_owned()).convert::<i32>();
        assert!(env.succeeded);
        assert_eq!(env.status_code, Some(StatusCode::OK));
        assert_eq!(env.data, None);
    }

    #[test]
    fn convert_keeps_compatible_payload() {
        let env = Envelope::success(7i64).convert::<f64>();
        assert!(env.data.is_some());
    }

    #[test]
    fn into_any_carries_payload_and_problem() {
        let env = Envelope::success(vec![1, 2, 3]).into_any();
        assert_eq!(env.data, Some(json!([1, 2, 3])));

        let env = Envelope::<String>::failure().into_any();
        assert!(env.problem.is_some());
        assert_eq!(env.data, None);
    }

    #[test]
    fn serializes_with_camel_case_keys_and_resolved_status() {
        let mut env = Envelope::success("hello");
        env.status_code = None;
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["succeeded"], json!(true));
        assert_eq!(json["statusCode"], json!(200));
        assert_eq!(json["data"], json!("hello"));
        assert_eq!(json["problemDetails"], serde_json::Value::Null);
    }

    #[test]
    fn deserializes_from_wire_shape() {
        let json = r#"{
            "succeeded": false,
            "statusCode": 404,
            "data": null,
            "problemDetails": {
                "type": "about:blank",
                "title": "Not Found",
                "detail": "missing",
                "status": 404
            }
        }"#;
        let env: Envelope<String> = serde_json::from_str(json).unwrap();
        assert!(!env.succeeded);
        assert_eq!(env.status_code, Some(StatusCode::NOT_FOUND));
        assert!(env.data.is_none());
        assert_eq!(env.problem.unwrap().title, "Not Found");
    }
}
