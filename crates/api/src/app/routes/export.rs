use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};

use invex_export::{Document, ExportFormat};

use crate::app::dto::ExportRequest;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/pdf", post(export_pdf))
        .route("/csv", post(export_csv))
        .route("/xlsx", post(export_xlsx))
}

pub async fn export_pdf(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    export(&services, ExportFormat::Pdf, body).await
}

pub async fn export_csv(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    export(&services, ExportFormat::Csv, body).await
}

pub async fn export_xlsx(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    export(&services, ExportFormat::Xlsx, body).await
}

async fn export(
    services: &AppServices,
    format: ExportFormat,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let document = services.export(format, &request.requested_ids()).await?;
    Ok(attachment(document))
}

fn attachment(document: Document) -> Response {
    let disposition = document.content_disposition();
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response()
}
