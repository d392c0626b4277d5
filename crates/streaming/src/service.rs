use std::future::Future;
use std::pin::Pin;

use crate::protocol::{BoundaryInfo, Breaks};

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error from a classification or boundary service call.
///
/// Cancellation is not represented here: an aborted request simply never
/// delivers a result, and the pipeline reports it as superseded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Non-success HTTP status; `body` carries the server's error text.
    Status { code: u16, body: String },
    /// Connection or transport failure before a status was available.
    Transport(String),
    /// The response arrived but could not be decoded.
    Decode(String),
}

impl ServiceError {
    /// Server-provided text when there is one, otherwise the generic
    /// rendering. Boundary lookup errors show this inline in the UI.
    pub fn server_text(&self) -> String {
        match self {
            ServiceError::Status { body, .. } if !body.is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Status { code, body } => {
                write!(f, "request failed with status {code}: {body}")
            }
            ServiceError::Transport(msg) => write!(f, "transport error: {msg}"),
            ServiceError::Decode(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Classification endpoint seam.
///
/// Implementations must be `Send + Sync` for use across async tasks.
/// Methods return boxed futures for dyn-compatibility.
pub trait BreaksService: Send + Sync {
    fn fetch_breaks(&self, url: &str) -> BoxFuture<'_, Result<Breaks, ServiceError>>;
}

/// Boundary (zip-code) lookup seam.
pub trait BoundaryService: Send + Sync {
    fn lookup_boundary(&self, url: &str) -> BoxFuture<'_, Result<BoundaryInfo, ServiceError>>;
}

#[cfg(test)]
mod tests {
    use super::ServiceError;

    #[test]
    fn server_text_prefers_the_body() {
        let err = ServiceError::Status {
            code: 400,
            body: "No zip code found".to_string(),
        };
        assert_eq!(err.server_text(), "No zip code found");

        let empty = ServiceError::Status {
            code: 502,
            body: String::new(),
        };
        assert_eq!(empty.server_text(), "request failed with status 502: ");

        let transport = ServiceError::Transport("connection refused".to_string());
        assert_eq!(transport.server_text(), "transport error: connection refused");
    }
}
