use crate::error::ShortenError;
use crate::mapping::LinkMapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenError>;

/// The request-facing shortening seam.
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens a URL, allocating a new code or returning the existing
    /// mapping when the configured strategy deduplicates by URL.
    async fn add_url(&self, long_url: &str) -> Result<LinkMapping>;

    /// Resolves a short code to its stored mapping.
    /// Returns `None` if the code is unknown; that is a normal outcome,
    /// not an error.
    async fn get_url(&self, code: &ShortCode) -> Result<Option<LinkMapping>>;
}
