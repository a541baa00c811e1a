//! Shopwindow Core - Shared types library.
//!
//! This crate provides common types used across all Shopwindow components:
//! - `catalog` - Remote catalog client (paging, caching, accumulation)
//! - `cart` - Persisted cart store and line-item aggregation
//! - `cli` - Command-line storefront browser
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no durable
//! storage. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product, page, cart, and filter types shared by every surface

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
