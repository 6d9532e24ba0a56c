//! Core types and traits for the Keyhole URL shortener.
//!
//! This crate provides the domain entities, the storage and shortener
//! seams, and the error taxonomy shared by the allocator, storage and
//! service crates.

pub mod error;
pub mod mapping;
pub mod shortcode;
pub mod shortener;
pub mod store;

pub use error::{AllocationError, ShortenError, StoreError};
pub use mapping::LinkMapping;
pub use shortcode::ShortCode;
pub use shortener::Shortener;
pub use store::{InsertOutcome, LinkStore};
