//! URL shortening service for Keyhole.
//!
//! This crate wires a [`CodeAllocator`][keyhole_allocator::CodeAllocator]
//! and a [`LinkStore`][keyhole_core::LinkStore] into the resolution
//! algorithm: idempotent reuse for deduplicating strategies and a
//! bounded collision-retry loop around the store's conditional insert.

pub mod config;
pub mod service;

pub use config::ShortenerConfig;
pub use service::LinkService;
