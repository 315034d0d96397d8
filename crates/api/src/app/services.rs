//! Application services shared by every handler.
//!
//! Nothing here is mutable after construction: the catalog is loaded once and
//! each export works on its own copy of the selected rows.

use invex_core::ProductId;
use invex_export::{Document, ExportFormat, exporter_for};
use invex_products::{Catalog, Product};

use crate::app::errors::ApiError;

#[derive(Debug)]
pub struct AppServices {
    catalog: Catalog,
}

impl AppServices {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    /// Filter the catalog down to `selected_ids` and render it as `format`.
    ///
    /// Rendering is CPU-bound, so it runs on the blocking pool; the caller's
    /// future resolves only once the whole document exists.
    pub async fn export(
        &self,
        format: ExportFormat,
        selected_ids: &[ProductId],
    ) -> Result<Document, ApiError> {
        let selection = self.catalog.selection(selected_ids)?;
        let rows = selection.len();

        let document = tokio::task::spawn_blocking(move || exporter_for(format).export(&selection))
            .await
            .map_err(|e| ApiError::export(format, e))?
            .map_err(|e| ApiError::export(format, e))?;

        tracing::info!(
            %format,
            rows,
            bytes = document.bytes.len(),
            "export generated"
        );
        Ok(document)
    }
}
