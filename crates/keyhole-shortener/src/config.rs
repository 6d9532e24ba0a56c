use typed_builder::TypedBuilder;

pub const DEFAULT_CODE_LENGTH: usize = 6;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Tunables for code allocation and the collision-retry loop.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct ShortenerConfig {
    /// Length of every produced short code, in characters.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,
    /// Upper bound on insert attempts before giving up on a request.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ShortenerConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.max_attempts, 5);
    }

    #[test]
    fn builder_overrides() {
        let config = ShortenerConfig::builder()
            .code_length(8)
            .max_attempts(3)
            .build();
        assert_eq!(config.code_length, 8);
        assert_eq!(config.max_attempts, 3);
    }
}
