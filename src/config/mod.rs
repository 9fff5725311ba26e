//! Agent configuration file: typed records plus YAML load/save.

pub mod loader;
pub mod types;

pub use loader::{config_dir, ensure_config_dir, ConfigError, CONFIG_DIR_NAME};
pub use types::{Agent, AgentConfig, Endpoint, Extra, Scalar, Upstream, CONFIG_VERSION};
