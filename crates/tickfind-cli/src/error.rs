use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] tickfind_core::ConfigError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Search(#[from] tickfind_core::SearchError),

    #[error("invalid log filter: {0}")]
    LogFilter(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Command(_) => 2,
            Self::LogFilter(_) => 2,
            Self::Search(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
