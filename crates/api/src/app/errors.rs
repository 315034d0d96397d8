use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use invex_export::ExportFormat;
use invex_products::SelectionError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Every way a request can fail after routing.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The export body was not a JSON object of the expected shape.
    #[error("Invalid request body")]
    InvalidBody(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Failed to fetch product data")]
    Catalog(#[source] BoxError),

    #[error("Failed to generate {}", .format.label())]
    Export {
        format: ExportFormat,
        #[source]
        source: BoxError,
    },
}

impl ApiError {
    pub fn export(format: ExportFormat, source: impl Into<BoxError>) -> Self {
        Self::Export {
            format,
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::Selection(_) => StatusCode::BAD_REQUEST,
            Self::Catalog(_) | Self::Export { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        match &self {
            Self::InvalidBody(detail) => tracing::debug!(%detail, "export rejected"),
            Self::Selection(e) => tracing::debug!(error = %e, "export rejected"),
            Self::Catalog(source) | Self::Export { source, .. } => {
                tracing::error!(error = %self, cause = %source, "request failed")
            }
        }
        json_error(status, self.to_string())
    }
}

/// `{"error": "<message>"}` with the given status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}
