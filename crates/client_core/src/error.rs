use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never completed.
    Transport,
    /// The service answered with a non-success status.
    Service,
    /// The response body did not have the expected shape.
    Decode,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("service rejected request with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Service {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("unexpected response body from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Service { .. } => ErrorKind::Service,
            ClientError::Decode { .. } => ErrorKind::Decode,
            ClientError::Transport { .. } | ClientError::InvalidServerUrl { .. } => {
                ErrorKind::Transport
            }
        }
    }

    pub fn service_detail(&self) -> Option<&str> {
        match self {
            ClientError::Service { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Text shown to the user. Only a service-reported failure may expose
    /// the service's explanation; everything else gets `generic`.
    pub fn user_message(&self, generic: &str, fallback: &str) -> String {
        match self.kind() {
            ErrorKind::Service => self.service_detail().unwrap_or(fallback).to_string(),
            ErrorKind::Transport | ErrorKind::Decode => generic.to_string(),
        }
    }
}
