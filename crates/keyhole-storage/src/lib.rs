//! `LinkStore` implementations for the Keyhole URL shortener.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryStore;
pub use mysql::MySqlStore;
