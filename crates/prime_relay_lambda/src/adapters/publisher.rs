use prime_relay_core::contract::MessageAttributes;

use crate::error::PublishError;

/// Outbound queue seam. Implementations return the transport status code and
/// surface transport failures as errors without retrying.
pub trait QueuePublisher {
    fn send_message(
        &self,
        queue_url: &str,
        body: &str,
        attributes: &MessageAttributes,
    ) -> Result<u16, PublishError>;

    fn send_message_batch(
        &self,
        queue_url: &str,
        bodies: &[String],
        attributes: &[MessageAttributes],
    ) -> Result<u16, PublishError>;
}
