//! Inventory domain module.
//!
//! Holds the product record and the in-memory manager that owns every product,
//! implemented purely as deterministic domain logic (no IO, no terminal).

pub mod manager;
pub mod product;

pub use manager::{InventoryManager, Listing, ProductRow};
pub use product::Product;
