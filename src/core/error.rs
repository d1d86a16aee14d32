use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;
