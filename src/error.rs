use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server rejected request: {0}")]
    Api(String),

    #[error("Session is no longer valid")]
    Unauthorized,

    #[error("Aggregation incomplete: {failed} of {total} booking sources failed")]
    PartialAggregation { failed: usize, total: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Coarse classification consumed by view code to pick recovery behavior:
/// re-authenticate on `Unauthorized`, show a retryable banner on
/// `NetworkOrServer`, annotate the feed on `PartialAggregationFailure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkOrServer,
    Unauthorized,
    PartialAggregationFailure,
    Client,
}

impl AppError {
    pub fn api<S: Into<String>>(msg: S) -> Self {
        Self::Api(msg.into())
    }

    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::Api(_) => ErrorKind::NetworkOrServer,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::PartialAggregation { .. } => ErrorKind::PartialAggregationFailure,
            Self::InvalidInput(_) | Self::Config(_) | Self::Other(_) => ErrorKind::Client,
        }
    }

    /// Whether the failure is worth re-issuing by the user (scroll again,
    /// press refresh). Unauthorized and local errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::NetworkOrServer)
    }
}

pub type AppResult<T> = Result<T, AppError>;
