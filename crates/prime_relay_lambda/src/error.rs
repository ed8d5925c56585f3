use prime_relay_core::contract::ContractError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("ClientError while sending sqs message to {queue_url}: {message}")]
    Transport { queue_url: String, message: String },

    #[error("invalid sqs message: {0}")]
    InvalidMessage(String),

    #[error(transparent)]
    Contract(#[from] ContractError),
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("{0} must be configured")]
    MissingConfiguration(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    InvalidConfiguration { key: &'static str, value: String },

    #[error("invalid SQS event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error(transparent)]
    MalformedPayload(#[from] ContractError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

pub type WorkerResult<T> = Result<T, WorkerError>;
