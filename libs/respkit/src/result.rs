//! Ergonomic result types for API handlers
//!
//! This module provides a type alias to make error handling in HTTP
//! handlers more concise and uniform.

use respkit_problem::Problem;

/// Standard result type for API operations
///
/// Use this throughout your handlers for consistent error handling:
///
/// ```ignore
/// async fn handler() -> ApiResult<Json<User>> {
///     let user = fetch_user().await?;  // auto-converts errors to Problem
///     Ok(Json(user))
/// }
/// ```
///
/// The `?` operator automatically converts any error implementing
/// `Into<Problem>` into a Problem. With the `axum` feature enabled,
/// Problem implements `IntoResponse`, so the framework converts it to an
/// HTTP response when returned from a handler.
pub type ApiResult<T = ()> = Result<T, Problem>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn api_result_ok() {
        let result: ApiResult<i32> = Ok(42);
        assert!(result.is_ok());
    }

    #[test]
    fn api_result_err() {
        let result: ApiResult<i32> =
            Err(Problem::new(StatusCode::BAD_REQUEST, "Bad Request", "Invalid input"));
        assert!(result.is_err());
    }
}
