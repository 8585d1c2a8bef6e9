use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpinionGraphError {
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("graph error: {0}")]
    Graph(String),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, OpinionGraphError>;
