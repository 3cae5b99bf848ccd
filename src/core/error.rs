use thiserror::Error;

/// Failures at the engine boundary. Game-rule violations are reported through
/// battle messages instead.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("a battle needs at least one party member")]
    EmptyParty,

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}
