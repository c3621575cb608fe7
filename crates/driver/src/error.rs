use tilefield_common::ConfigError;

/// Errors surfaced by the frame driver and config loading.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
