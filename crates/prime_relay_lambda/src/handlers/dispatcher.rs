use std::fmt;

use prime_relay_core::classification::join_numbers;
use prime_relay_core::contract::{InboundBatch, Number, NumberPayload};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::error::{WorkerError, WorkerResult};

/// Per-record classification seam used by the dispatcher.
pub trait RecordClassifier {
    fn classify_record(&self, numbers: &[Number]) -> WorkerResult<Vec<Number>>;
}

impl<F> RecordClassifier for F
where
    F: Fn(&[Number]) -> WorkerResult<Vec<Number>>,
{
    fn classify_record(&self, numbers: &[Number]) -> WorkerResult<Vec<Number>> {
        self(numbers)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordOutcome {
    Classified { message_id: String, primes: Vec<Number> },
    NoNumbers { message_id: String },
}

impl fmt::Display for RecordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classified { primes, .. } => {
                write!(f, "Prime numbers found: {}", join_numbers(primes))
            }
            Self::NoNumbers { message_id } => write!(
                f,
                "Message Id: {message_id} didn't present any numbers to be processed."
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BatchReport {
    pub records_received: usize,
    pub outcomes: Vec<RecordOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_error: Option<String>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.general_error.is_none() && self.outcomes.len() == self.records_received
    }

    pub fn general_error_line(&self) -> Option<String> {
        self.general_error
            .as_ref()
            .map(|message| format!("General Error: {message}"))
    }
}

/// Processes one SQS trigger event. Never fails: the first error aborts the
/// rest of the batch and is recorded in the report instead.
pub fn handle_sqs_event(event: Value, classifier: &dyn RecordClassifier) -> BatchReport {
    info!(component = "dispatcher", event = "batch_received", "Event received...");
    info!(component = "dispatcher", event = "batch_started", "Processing prime numbers");

    let mut report = BatchReport::default();
    if let Err(failure) = process_records(event, classifier, &mut report) {
        report.general_error = Some(failure.to_string());
        error!(
            component = "dispatcher",
            event = "batch_aborted",
            records_received = report.records_received,
            records_processed = report.outcomes.len(),
            "General Error: {failure}"
        );
    }
    report
}

fn process_records(
    event: Value,
    classifier: &dyn RecordClassifier,
    report: &mut BatchReport,
) -> Result<(), WorkerError> {
    let batch: InboundBatch = serde_json::from_value(event)?;
    report.records_received = batch.records.len();

    for record in &batch.records {
        let payload = NumberPayload::from_body(record.body()?)?;
        let message_id = record.id()?.to_string();

        let outcome = if payload.is_empty() {
            RecordOutcome::NoNumbers { message_id }
        } else {
            let primes = classifier.classify_record(&payload.numbers)?;
            RecordOutcome::Classified { message_id, primes }
        };

        info!(component = "dispatcher", event = "record_processed", "{outcome}");
        report.outcomes.push(outcome);
    }

    Ok(())
}
