//! Settings for the file adapters.

/// Name prefix given to compressed files.
pub const DEFAULT_PREFIX: &str = "huffman_";

/// How compressed files are named and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prepended to a file name on compression, stripped on decompression.
    pub prefix: String,
    /// Replace an existing output file instead of failing.
    pub overwrite: bool,
}

impl Config {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `prefix` for compressed file names.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Allow replacing existing output files.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            overwrite: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = Config::new().with_prefix("hz_").with_overwrite(true);
        assert_eq!(config.prefix, "hz_");
        assert!(config.overwrite);
        assert_eq!(Config::default().prefix, DEFAULT_PREFIX);
        assert!(!Config::default().overwrite);
    }
}
