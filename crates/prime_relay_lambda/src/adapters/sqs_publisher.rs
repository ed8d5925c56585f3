use std::collections::HashMap;

use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::{
    BatchResultErrorEntry, MessageAttributeValue, SendMessageBatchRequestEntry,
};
use prime_relay_core::contract::{build_batch_entries, BatchEntry, MessageAttributes};
use tracing::{debug, error, warn};

use crate::adapters::publisher::QueuePublisher;
use crate::error::PublishError;

/// The SDK only hands back modelled outputs for 2xx responses; anything else
/// arrives as an `SdkError`.
const SQS_OK_STATUS: u16 = 200;

pub struct SqsQueuePublisher {
    sqs_client: aws_sdk_sqs::Client,
    delay_seconds: i32,
}

impl SqsQueuePublisher {
    pub fn new(sqs_client: aws_sdk_sqs::Client, delay_seconds: i32) -> Self {
        Self {
            sqs_client,
            delay_seconds,
        }
    }
}

impl QueuePublisher for SqsQueuePublisher {
    fn send_message(
        &self,
        queue_url: &str,
        body: &str,
        attributes: &MessageAttributes,
    ) -> Result<u16, PublishError> {
        let message_attributes = to_sdk_attributes(attributes)?;
        let client = self.sqs_client.clone();
        let target_queue_url = queue_url.to_string();
        let message_body = body.to_string();
        let delay_seconds = self.delay_seconds;

        let result = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .send_message()
                    .queue_url(target_queue_url)
                    .delay_seconds(delay_seconds)
                    .set_message_attributes(Some(message_attributes))
                    .message_body(message_body)
                    .send()
                    .await
            })
        });

        match result {
            Ok(output) => {
                debug!(
                    component = "sqs_publisher",
                    queue_url,
                    message_id = output.message_id().unwrap_or_default(),
                    "message sent"
                );
                Ok(SQS_OK_STATUS)
            }
            Err(sdk_error) => Err(transport_failure(
                queue_url,
                DisplayErrorContext(&sdk_error).to_string(),
            )),
        }
    }

    fn send_message_batch(
        &self,
        queue_url: &str,
        bodies: &[String],
        attributes: &[MessageAttributes],
    ) -> Result<u16, PublishError> {
        let entries = to_sdk_entries(&build_batch_entries(bodies, attributes)?)?;
        let entry_count = entries.len();
        let client = self.sqs_client.clone();
        let target_queue_url = queue_url.to_string();

        let result = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .send_message_batch()
                    .queue_url(target_queue_url)
                    .set_entries(Some(entries))
                    .send()
                    .await
            })
        });

        match result {
            Ok(output) => {
                let failed = describe_failed_entries(output.failed());
                if failed.is_empty() {
                    debug!(
                        component = "sqs_publisher",
                        queue_url,
                        entry_count,
                        "message batch sent"
                    );
                } else {
                    warn!(
                        component = "sqs_publisher",
                        queue_url,
                        entry_count,
                        failed_count = failed.len(),
                        failed_entries = %failed.join(", "),
                        "some batch entries were rejected by {queue_url}"
                    );
                }
                Ok(SQS_OK_STATUS)
            }
            Err(sdk_error) => Err(transport_failure(
                queue_url,
                DisplayErrorContext(&sdk_error).to_string(),
            )),
        }
    }
}

/// `id: code` for each entry SQS refused inside an otherwise accepted batch.
fn describe_failed_entries(failed: &[BatchResultErrorEntry]) -> Vec<String> {
    failed
        .iter()
        .map(|entry| format!("{}: {}", entry.id(), entry.code()))
        .collect()
}

fn transport_failure(queue_url: &str, message: String) -> PublishError {
    error!(
        component = "sqs_publisher",
        queue_url,
        error = %message,
        "ClientError while sending sqs message to {queue_url}"
    );
    PublishError::Transport {
        queue_url: queue_url.to_string(),
        message,
    }
}

fn to_sdk_attributes(
    attributes: &MessageAttributes,
) -> Result<HashMap<String, MessageAttributeValue>, PublishError> {
    attributes
        .iter()
        .map(|(name, attribute)| {
            MessageAttributeValue::builder()
                .data_type(&attribute.data_type)
                .string_value(&attribute.string_value)
                .build()
                .map(|value| (name.clone(), value))
                .map_err(|error| {
                    PublishError::InvalidMessage(format!("attribute '{name}': {error}"))
                })
        })
        .collect()
}

fn to_sdk_entries(
    entries: &[BatchEntry],
) -> Result<Vec<SendMessageBatchRequestEntry>, PublishError> {
    entries
        .iter()
        .map(|entry| {
            SendMessageBatchRequestEntry::builder()
                .id(&entry.id)
                .message_body(&entry.body)
                .set_message_attributes(Some(to_sdk_attributes(&entry.attributes)?))
                .build()
                .map_err(|error| {
                    PublishError::InvalidMessage(format!("batch entry '{}': {error}", entry.id))
                })
        })
        .collect()
}
