use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parcours_core::error::CaseError;

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<CaseError>() {
            match e {
                CaseError::NotInitialized => StatusCode::BAD_REQUEST,
                CaseError::CaseNotFound(_) => StatusCode::NOT_FOUND,
                CaseError::CaseExists(_) => StatusCode::CONFLICT,
                CaseError::InvalidSlug(_)
                | CaseError::InvalidRole(_)
                | CaseError::InvalidStatus(_)
                | CaseError::InvalidAction(_)
                | CaseError::InvalidTopic(_)
                | CaseError::MissingInput(_)
                | CaseError::InvalidSurgeons(_) => StatusCode::BAD_REQUEST,
                CaseError::ActionNotAvailable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                CaseError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
                CaseError::Io(_) | CaseError::Yaml(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcours_core::types::{ActionId, GlobalStatus, Role};

    #[test]
    fn case_not_found_maps_to_404() {
        let err = AppError(CaseError::CaseNotFound("dupont".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn case_exists_maps_to_409() {
        let err = AppError(CaseError::CaseExists("dupont".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_slug_maps_to_400() {
        let err = AppError(CaseError::InvalidSlug("BAD SLUG".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_input_maps_to_400() {
        let err = AppError(CaseError::MissingInput("Justification du refus".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_surgeons_maps_to_400() {
        let err = AppError(CaseError::InvalidSurgeons("expected 1 or 2".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_initialized_maps_to_400() {
        let err = AppError(CaseError::NotInitialized.into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn action_not_available_maps_to_422() {
        let err = AppError(
            CaseError::ActionNotAvailable {
                action: ActionId::ApproveMedical,
                role: Role::Physician,
                status: GlobalStatus::Draft,
            }
            .into(),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn permission_denied_maps_to_403() {
        let err = AppError(
            CaseError::PermissionDenied {
                role: Role::Physician,
                action: ActionId::ConfirmQuote,
            }
            .into(),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn io_error_maps_to_500() {
        let io_err = std::io::Error::other("disk full");
        let err = AppError(CaseError::Io(io_err).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_case_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_body_is_json_with_error_field() {
        let err = AppError(CaseError::CaseNotFound("dupont".into()).into());
        let response = err.into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(
            ct.to_str().unwrap().contains("application/json"),
            "expected JSON content type, got {:?}",
            ct
        );
    }
}
