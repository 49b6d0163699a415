use thiserror::Error;

/// Errors from the HTTP client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status; `msg` is its `{msg}` body.
    #[error("{msg}")]
    Api { status: u16, msg: String },

    #[error("Could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Not logged in. Run `wallet auth login` first")]
    NotAuthenticated,

    #[error("Invalid server URL {url}: {source}")]
    InvalidServer {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not valid JSON: {0}")]
    SessionFormat(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
