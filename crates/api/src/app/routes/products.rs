use std::sync::Arc;

use axum::{Json, extract::Extension};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// `GET /api/products`: the whole catalog, in file order.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let items =
        serde_json::to_value(services.products()).map_err(|e| ApiError::Catalog(e.into()))?;
    Ok(Json(items))
}
