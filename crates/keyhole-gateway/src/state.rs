use keyhole_core::Shortener;
use std::sync::Arc;

/// Shared application state: the shortening service, constructed once at
/// process start and handed to every request.
#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>) -> Self {
        Self { shortener }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }
}
