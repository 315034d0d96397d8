//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: the injected read-only catalog and the export pipeline
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use invex_products::Catalog;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
///
/// The catalog is moved in once and shared read-only by every handler.
pub fn build_app(catalog: Catalog) -> Router {
    let services = Arc::new(services::AppServices::new(catalog));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn(middleware::request_id)),
        )
}
