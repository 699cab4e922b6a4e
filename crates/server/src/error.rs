use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use wingman_core::errors::{ApplicationError, DomainError, InterfaceError};
use wingman_db::RepositoryError;

/// Handler error: an [`InterfaceError`] with a fresh correlation id.
#[derive(Debug)]
pub struct ApiError(pub InterfaceError);

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    error_class: &'static str,
    user_message: &'static str,
    correlation_id: &'a str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
            InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::from(ApplicationError::NotFound(what.into()))
    }
}

impl From<ApplicationError> for ApiError {
    fn from(value: ApplicationError) -> Self {
        Self(value.into_interface(uuid::Uuid::new_v4().to_string()))
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self::from(ApplicationError::from(value))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(value: RepositoryError) -> Self {
        Self::from(ApplicationError::from(value))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                event_name = "server.request.failed",
                correlation_id = %self.0.correlation_id(),
                error = %self.0,
                "request failed"
            );
        }

        let body = ErrorBody {
            error: self.0.message(),
            error_class: self.0.error_class(),
            user_message: self.0.user_message(),
            correlation_id: self.0.correlation_id(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use wingman_core::errors::{ApplicationError, DomainError};
    use wingman_db::RepositoryError;

    use super::ApiError;

    #[test]
    fn errors_map_to_http_statuses() {
        assert_eq!(ApiError::from(DomainError::MissingField("user_id")).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("chat room `x`").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(ApplicationError::Persistence("lock".to_string())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(ApplicationError::Configuration("bad".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_repository_row_is_not_found() {
        let error = ApiError::from(RepositoryError::NotFound { entity: "chat room", id: "room_1".to_string() });

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert!(!error.0.correlation_id().is_empty());
    }
}
