//! The in-memory catalog: loading and selection.
//!
//! The catalog is built once at startup and shared read-only afterwards, so
//! nothing here takes `&mut self`.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use invex_core::{DomainError, DomainResult, ProductId};

use crate::product::Product;

/// On-disk shape: `{ "products": [ ... ] }`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Ordered, validated, read-only list of products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-parsed records.
    ///
    /// Fails if any record is invalid or if two records share an id.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(&product.id) {
                return Err(DomainError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse and validate a catalog document.
    pub fn from_json(raw: &str) -> DomainResult<Self> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Self::new(file.products)
    }

    /// Read, parse and validate the catalog file at `path`.
    pub fn load(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| DomainError::io(path, e))?;
        let catalog = Self::from_json(&raw)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Catalog entries whose id appears in `requested`, in catalog order.
    ///
    /// Duplicate requested ids do not duplicate rows; unknown ids are ignored.
    pub fn select(&self, requested: &[ProductId]) -> Vec<&Product> {
        let wanted: HashSet<&ProductId> = requested.iter().collect();
        self.filter(&wanted)
    }

    /// Like [`Catalog::select`], but an empty result is an explicit error.
    pub fn selection(&self, requested: &[ProductId]) -> Result<Selection, SelectionError> {
        let wanted: HashSet<&ProductId> = requested.iter().collect();
        let matched = self.filter(&wanted);
        if matched.len() < wanted.len() {
            let unknown = unknown_ids(&wanted, &matched);
            tracing::debug!(?unknown, "ignoring unknown product ids");
        }
        if matched.is_empty() {
            return Err(SelectionError::Empty);
        }
        Ok(Selection {
            rows: matched.into_iter().cloned().collect(),
        })
    }

    fn filter(&self, wanted: &HashSet<&ProductId>) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| wanted.contains(&p.id))
            .collect()
    }
}

/// Requested ids with no catalog entry, in a stable order for logging.
fn unknown_ids<'a>(wanted: &HashSet<&'a ProductId>, matched: &[&Product]) -> Vec<&'a ProductId> {
    let found: HashSet<&ProductId> = matched.iter().map(|p| &p.id).collect();
    let mut unknown: Vec<&'a ProductId> = wanted
        .iter()
        .filter(|id| !found.contains(**id))
        .copied()
        .collect();
    unknown.sort();
    unknown
}

/// Why a selection could not be exported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Nothing in the catalog matched the requested ids (or none were given).
    #[error("No data to export")]
    Empty,
}

/// A non-empty, catalog-ordered set of products chosen for export.
///
/// Only [`Catalog::selection`] constructs one, so exporters never see an empty
/// input. Rows are owned so a selection can move onto a worker thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    rows: Vec<Product>,
}

impl Selection {
    pub fn products(&self) -> &[Product] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false`; present for API symmetry with [`Catalog`].
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
