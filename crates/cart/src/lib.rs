//! Shopwindow Cart - persisted cart store and line-item aggregation.
//!
//! # Architecture
//!
//! - [`storage`] - the durable-state seam: a [`CartStorage`] trait, the
//!   production [`JsonFileStorage`], and an in-memory implementation
//! - [`store`] - [`CartStore`]: the single source of truth for cart
//!   membership and quantities; sole reader/writer of durable state
//! - [`aggregator`] - joins cart entries against a catalog snapshot into
//!   priced lines and a grand total
//!
//! Mutations are write-then-reflect: durable storage is updated before the
//! in-memory view, so a crash between a mutation and a later read can never
//! show a cart state that was not actually persisted.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod aggregator;
pub mod storage;
pub mod store;

pub use aggregator::{build_lines, UNKNOWN_PRODUCT_TITLE};
pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::CartStore;
