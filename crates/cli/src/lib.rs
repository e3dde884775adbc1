//! Interactive terminal front end for the inventory store.
//!
//! Parses and validates user input, calls the store, and prints its answers.
//! All inventory rules live in `stockfile-inventory`.

pub mod config;
pub mod menu;

pub use config::{Config, ConfigError};
pub use menu::Menu;
