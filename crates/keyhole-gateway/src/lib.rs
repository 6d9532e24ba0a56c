//! HTTP surface for the Keyhole URL shortener.
//!
//! Exposes link creation and redirection over axum; the shortening
//! logic itself lives behind the [`Shortener`][keyhole_core::Shortener]
//! trait in the application state.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
