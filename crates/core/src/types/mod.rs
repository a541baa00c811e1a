//! Core types for Shopwindow.
//!
//! This module provides the domain vocabulary shared by the catalog engine,
//! the cart store, and the CLI.

pub mod cart;
pub mod id;
pub mod product;

pub use cart::{CartEntry, CartLine, CartSummary};
pub use id::ProductId;
pub use product::{CatalogPage, CategoryFilter, ParseSortOrderError, Product, SortOrder};
