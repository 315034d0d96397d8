use axum::{Router, routing::get};

pub mod export;
pub mod products;
pub mod system;

/// Router for the catalog and export endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/api/products", get(products::list_products))
        .nest("/export", export::router())
}
