use clap::Parser;

use crate::config::{
    ConfigError, SimulatorConfig, TreeLimits, DEFAULT_MAX_NAME_LEN, DEFAULT_MAX_NODES,
    DEFAULT_PURGE_SUFFIX,
};
use crate::logging::{LogFormat, LoggingConfig};

/// Interactive in-memory file system simulator
#[derive(Parser, Debug)]
#[command(name = "fs-sim")]
#[command(about = "Interactive in-memory file system simulator", version)]
pub struct Cli {
    /// Longest accepted file or directory name, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_NAME_LEN)]
    pub max_name_len: usize,

    /// Maximum number of live nodes, root included
    #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
    pub max_nodes: usize,

    /// Suffix of the files removed by `rmtmp`
    #[arg(long, default_value = DEFAULT_PURGE_SUFFIX)]
    pub purge_suffix: String,

    /// Skip the startup banner
    #[arg(long)]
    pub no_banner: bool,

    /// Log filter (trace, debug, info, warn, error, off, or a directive)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn simulator_config(&self) -> Result<SimulatorConfig, ConfigError> {
        let config = SimulatorConfig {
            limits: TreeLimits {
                max_name_len: self.max_name_len,
                max_nodes: self.max_nodes,
            },
            purge_suffix: self.purge_suffix.clone(),
            show_banner: !self.no_banner,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}
