use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request-level failures for the credential endpoints.
///
/// The `Display` string of each client variant is exactly what the caller
/// sees; internal detail stays in the log.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please enter all fields")]
    MissingFields,
    #[error("User with that email or username already exists")]
    DuplicateUser,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        // The pre-insert duplicate check cannot close the race with a
        // concurrent register; the UNIQUE constraints can. Surface that
        // conflict the same way the pre-check does.
        if let sqlx::Error::Database(db) = &err {
            if db.code().as_deref() == Some("23505") {
                return AuthError::DuplicateUser;
            }
        }
        AuthError::Internal(err.into())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            AuthError::MissingFields | AuthError::DuplicateUser | AuthError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AuthError::Internal(err) => {
                error!(error = %err, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };
        (status, Json(json!({ "msg": msg }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_msg(response: Response) -> (StatusCode, String) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        (status, value["msg"].as_str().expect("msg field").to_string())
    }

    #[tokio::test]
    async fn missing_fields_is_a_bad_request() {
        let (status, msg) = body_msg(AuthError::MissingFields.into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, "Please enter all fields");
    }

    #[tokio::test]
    async fn duplicate_user_is_a_bad_request() {
        let (status, msg) = body_msg(AuthError::DuplicateUser.into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, "User with that email or username already exists");
    }

    #[tokio::test]
    async fn invalid_credentials_is_a_bad_request() {
        let (status, msg) = body_msg(AuthError::InvalidCredentials.into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, "Invalid credentials");
    }

    #[tokio::test]
    async fn internal_errors_hide_their_detail() {
        let err = AuthError::Internal(anyhow::anyhow!("connection refused to db-host:5432"));
        let (status, msg) = body_msg(err.into_response()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, "Server error");
    }
}
