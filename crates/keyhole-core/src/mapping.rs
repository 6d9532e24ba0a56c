use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A persisted short-code to URL mapping.
///
/// Mappings are immutable: they are created exactly once on the first
/// successful allocation and are never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkMapping {
    /// The unique short code.
    pub short_code: ShortCode,
    /// The original URL that was shortened.
    pub long_url: String,
    /// When the mapping was created.
    pub created_at: Timestamp,
}
