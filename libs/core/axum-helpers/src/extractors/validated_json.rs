//! JSON extractor with automatic validation using the validator crate.

use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::ErrorResponse;

/// JSON extractor with automatic validation.
///
/// Deserializes the request body and runs the payload's `Validate` impl,
/// rejecting with a structured 400 when either step fails.
///
/// # Example
/// ```ignore
/// use axum_helpers::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct ChatRequest {
///     #[validate(length(min = 1))]
///     query: String,
/// }
///
/// async fn chat(ValidatedJson(payload): ValidatedJson<ChatRequest>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| e.into_response())?;

        data.validate().map_err(|e| {
            let details = e
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let messages: Vec<serde_json::Value> = errors
                        .iter()
                        .map(|err| {
                            serde_json::json!({
                                "code": err.code,
                                "message": err.message,
                            })
                        })
                        .collect();
                    (field.to_string(), serde_json::json!(messages))
                })
                .collect::<serde_json::Map<_, _>>();

            let body = ErrorResponse::new("validation_error", "Request validation failed")
                .with_details(serde_json::Value::Object(details));

            (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
        })?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request as HttpRequest, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1))]
        query: String,
    }

    async fn handler(ValidatedJson(payload): ValidatedJson<Payload>) -> String {
        payload.query
    }

    fn app() -> Router {
        Router::new().route("/", post(handler))
    }

    #[tokio::test]
    async fn test_valid_payload_passes() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":"cheap laptops"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_field_rejected_with_400() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_field_rejected() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}
