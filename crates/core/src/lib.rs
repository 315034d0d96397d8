//! `invex-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog and the
//! exporters (no HTTP, no document formats).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
