//! JSON extractor whose rejections use the API error shape

use axum::{
    extract::{rejection::JsonRejection as AxumRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::{de::DeserializeOwned, Serialize};

use super::error::{ApiErrorDetail, ApiErrorResponse, ApiErrorType};

/// Wrapper around `axum::Json` so malformed bodies come back as the same
/// JSON error envelope every other failure uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

/// Body rejection carried until response conversion
#[derive(Debug)]
pub struct JsonRejection {
    status: StatusCode,
    message: String,
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(JsonRejection {
                status: rejection.status(),
                message: rejection_message(&rejection),
            }),
        }
    }
}

fn rejection_message(rejection: &AxumRejection) -> String {
    match rejection {
        AxumRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        AxumRejection::JsonSyntaxError(err) => {
            format!("Invalid JSON syntax: {}", err.body_text())
        }
        AxumRejection::MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        _ => "Invalid JSON request".to_string(),
    }
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            error: ApiErrorDetail {
                message: self.message,
                error_type: ApiErrorType::InvalidRequestError,
                code: Some("json_parse_error".to_string()),
            },
        };

        (self.status, AxumJson(body)).into_response()
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_keeps_status() {
        let rejection = JsonRejection {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "bad body".to_string(),
        };

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_rejection_body_is_api_error_shape() {
        let rejection = JsonRejection {
            status: StatusCode::BAD_REQUEST,
            message: "bad body".to_string(),
        };

        let response = rejection.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"]["message"], "bad body");
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(body["error"]["code"], "json_parse_error");
    }
}
