use crate::blog::Slug;
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no post with slug {0:?}")]
    NotFound(Slug),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("couldn't render post: {0}")]
    Render(String),
}

impl From<crate::admin::SubmissionError> for AppError {
    fn from(err: crate::admin::SubmissionError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::Store(StoreError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::BadRequest(_) | AppError::Store(StoreError::InvalidSlug(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Store(StoreError::SlugTaken(_)) => StatusCode::CONFLICT,
            AppError::Store(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "rendering error boundary");
        }

        let body = match &self {
            AppError::NotFound(slug) | AppError::Store(StoreError::NotFound(slug)) => {
                crate::view::boundary::not_found(slug)
            }
            other => crate::view::boundary::error(&other.to_string()),
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            AppError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Store(StoreError::NotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Store(StoreError::SlugTaken("x".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::BadRequest("nope".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Render("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
