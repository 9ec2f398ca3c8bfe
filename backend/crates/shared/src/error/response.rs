//! HTTP rendering of [`AppError`] (feature `axum`)
//!
//! Errors become RFC 7807 problem documents. The source error never reaches
//! the body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::app_error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "code": self.kind(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_problem_document() {
        let response = AppError::new(ErrorKind::Conflict, "That username is already taken.")
            .with_action("Pick a different username")
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let json = body_json(response).await;
        assert_eq!(json["status"], 409);
        assert_eq!(json["title"], "Conflict");
        assert_eq!(json["code"], "CONFLICT");
        assert_eq!(json["detail"], "That username is already taken.");
        assert_eq!(json["action"], "Pick a different username");
    }

    #[tokio::test]
    async fn test_source_not_rendered() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "/srv/users.json: EIO");
        let response = AppError::internal("Credential store unavailable")
            .with_source(io_err)
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["detail"], "Credential store unavailable");
        assert!(!json.to_string().contains("/srv/users.json"));
        assert_eq!(json["action"], serde_json::Value::Null);
    }
}
