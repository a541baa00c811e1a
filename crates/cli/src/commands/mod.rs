//! CLI command implementations.

pub mod cart;
pub mod categories;
pub mod products;
