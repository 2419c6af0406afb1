use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid listing endpoint `{endpoint}`: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("listing endpoint must use http or https, got `{0}`")]
    UnsupportedScheme(String),

    #[error("listing request failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error("listing request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed listing response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the server answered but with a non-2xx status.
    pub fn is_status(&self) -> bool {
        matches!(self, ClientError::Status(_))
    }
}
