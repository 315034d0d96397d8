use serde::Deserialize;
use serde_json::Value;

use invex_core::ProductId;

// -------------------------
// Request DTOs
// -------------------------

/// Body of every `POST /export/*` call.
///
/// A missing or `null` `selectedIds` is the same as an empty list. Entries are
/// kept as raw JSON so one unusable id never rejects the whole request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub selected_ids: Option<Vec<Value>>,
}

impl ExportRequest {
    /// Requested ids that could match a catalog entry; the rest are dropped.
    pub fn requested_ids(&self) -> Vec<ProductId> {
        self.selected_ids
            .iter()
            .flatten()
            .filter_map(ProductId::from_requested)
            .collect()
    }
}
