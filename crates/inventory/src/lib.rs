//! Inventory catalog backed by a flat `;`-delimited text file.
//!
//! The [`InventoryStore`] keeps every [`Product`] in memory, loads them from the
//! backing file on construction, and rewrites the whole file after each
//! successful mutation.

pub mod error;
pub mod product;
pub mod record;
pub mod store;

pub use error::{InventoryError, InventoryResult, StoreIoError};
pub use product::{Price, Product, ProductId, ProductUpdate};
pub use record::LineError;
pub use store::{Ack, DEFAULT_INVENTORY_FILE, InventoryStore, Listing, LoadIssue, LoadReport};
