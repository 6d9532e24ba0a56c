use jiff::Timestamp;
use keyhole_core::LinkMapping;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub data: LinkData,
}

#[derive(Debug, Serialize)]
pub struct LinkData {
    pub short_code: String,
    pub long_url: String,
    pub created_at: Timestamp,
}

impl From<LinkMapping> for ShortenResponse {
    fn from(mapping: LinkMapping) -> Self {
        Self {
            data: LinkData {
                short_code: mapping.short_code.to_string(),
                long_url: mapping.long_url,
                created_at: mapping.created_at,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
