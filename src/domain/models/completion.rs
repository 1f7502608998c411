use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use thiserror::Error;

/// Accounting reported by the assistant service for a single answer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub total_tokens: u64,
    pub total_price: f64,
    pub currency: String,
    /// Seconds.
    pub latency: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    pub query: String,
    /// Opaque per-session correlation tag forwarded as the service's `user`.
    pub user: String,
}

impl CompletionRequest {
    pub fn new(query: &str, user: &str) -> CompletionRequest {
        return CompletionRequest {
            query: query.to_string(),
            user: user.to_string(),
        };
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    /// Raw answer, reasoning blocks included.
    pub answer: String,
    pub message_id: Option<String>,
    pub usage: Option<Usage>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionErrorKind {
    TransportFailure,
    EmptyAnswer,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Failed to reach the assistant: {0}")]
    TransportFailure(String),

    #[error("The assistant replied without an answer")]
    EmptyAnswer,
}

impl CompletionError {
    pub fn kind(&self) -> CompletionErrorKind {
        match self {
            CompletionError::TransportFailure(_) => return CompletionErrorKind::TransportFailure,
            CompletionError::EmptyAnswer => return CompletionErrorKind::EmptyAnswer,
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> CompletionError {
        return CompletionError::TransportFailure(err.to_string());
    }
}

#[async_trait]
pub trait CompletionClient {
    /// Used at startup to verify all configurations are available to work with
    /// the assistant service.
    async fn health_check(&self) -> anyhow::Result<()>;

    /// Sends a single query and waits for the complete answer. Implementations
    /// never retry and never cache.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError>;
}

pub type CompletionClientBox = Box<dyn CompletionClient + Send + Sync>;
