use std::path::PathBuf;

/// Root directory scanned when the caller does not supply one
pub const DEFAULT_ROOT: &str = "dc-code-prototype";

/// Configuration for a conversion pass
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Root directory to walk
    pub root: PathBuf,
    /// Follow symbolic links during traversal
    pub follow_links: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            follow_links: false,
        }
    }
}

impl ConvertConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConvertConfig::default();
        assert_eq!(config.root, PathBuf::from(DEFAULT_ROOT));
        assert!(!config.follow_links);
    }

    #[test]
    fn test_config_builder() {
        let config = ConvertConfig::new(PathBuf::from("/test")).with_follow_links(true);

        assert_eq!(config.root, PathBuf::from("/test"));
        assert!(config.follow_links);
    }
}
