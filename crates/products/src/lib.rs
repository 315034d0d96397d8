//! Products domain module (read-only catalog).
//!
//! This crate owns the product records, loading them from the static catalog
//! file, and filtering them down to a caller's selection. No HTTP, no document
//! formats.

pub mod catalog;
pub mod product;

pub use catalog::{Catalog, Selection, SelectionError};
pub use product::Product;
