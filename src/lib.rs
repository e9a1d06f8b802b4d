//! Cookie Transfer Core Library
//!
//! This library provides the cookie record normalization and bulk transfer
//! engine: it converts loosely-shaped cookie records (from export tools or
//! hand-edited JSON) into a canonical form safe to hand to a cookie store,
//! enforces the store's consistency rules, and performs best-effort bulk
//! application with per-record isolation and structured error reporting.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`record`] - Canonical [`CookieRecord`] and store-addressing helpers
//! - [`normalize`] - Pure raw-record to canonical-record normalization
//! - [`transfer`] - Bulk import/export orchestration over a store collaborator
//! - [`store`] - In-memory [`CookieStore`] implementation
//!
//! UI rendering, tab/domain discovery, and file plumbing are the caller's
//! concern; the engine stays stateless between calls.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod normalize;
pub mod record;
pub mod store;
pub mod transfer;

// Re-export commonly used types
pub use normalize::{NormalizationError, RawCookieInput, normalize};
pub use record::{CookieRecord, SameSite, canonicalize_domain, target_url};
pub use store::MemoryStore;
pub use transfer::{
    BulkTransfer, CookieStore, ExportDocument, ExportPolicy, ExportScope, ImportError,
    RecordError, SetCookieError, StoreError, StoreFilter, TransferResult,
};
