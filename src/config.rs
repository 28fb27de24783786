use thiserror::Error;

/// Longest accepted entry name in bytes.
pub const DEFAULT_MAX_NAME_LEN: usize = 49;
pub const DEFAULT_MAX_NODES: usize = 100_000;
pub const DEFAULT_PURGE_SUFFIX: &str = ".tmp";

/// Bounds enforced by the tree at the node creation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLimits {
    pub max_name_len: usize,
    /// Live nodes allowed at once, root included.
    pub max_nodes: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    pub limits: TreeLimits,
    pub purge_suffix: String,
    pub show_banner: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            limits: TreeLimits::default(),
            purge_suffix: DEFAULT_PURGE_SUFFIX.to_string(),
            show_banner: true,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
    #[error("max-nodes must be at least 2")]
    TooFewNodes,
    #[error("purge suffix must not be empty")]
    EmptySuffix,
    #[error("purge suffix must not contain '/': {0:?}")]
    SuffixWithSeparator(String),
}

impl SimulatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_name_len == 0 {
            return Err(ConfigError::ZeroLimit("max-name-len"));
        }
        // The root always occupies one slot.
        if self.limits.max_nodes < 2 {
            return Err(ConfigError::TooFewNodes);
        }
        if self.purge_suffix.is_empty() {
            return Err(ConfigError::EmptySuffix);
        }
        if self.purge_suffix.contains('/') {
            return Err(ConfigError::SuffixWithSeparator(self.purge_suffix.clone()));
        }
        Ok(())
    }
}
