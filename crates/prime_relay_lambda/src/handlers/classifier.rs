use prime_relay_core::classification::PrimeClassification;
use prime_relay_core::contract::{is_success_status, Number, OutboundMessage};
use tracing::info;

use crate::adapters::publisher::QueuePublisher;
use crate::config::WorkerConfig;
use crate::error::{PublishError, WorkerResult};
use crate::handlers::dispatcher::RecordClassifier;

/// Classification context for one record. Both partitions stay readable after
/// `classify` returns.
pub struct PrimeClassifier<'a> {
    config: &'a WorkerConfig,
    publisher: &'a dyn QueuePublisher,
    classification: PrimeClassification,
}

impl<'a> PrimeClassifier<'a> {
    pub fn new(config: &'a WorkerConfig, publisher: &'a dyn QueuePublisher) -> Self {
        Self {
            config,
            publisher,
            classification: PrimeClassification::default(),
        }
    }

    /// Partitions `numbers` and forwards any primes to the destination queue.
    /// Each call starts from a clean partition.
    pub fn classify(&mut self, numbers: &[Number]) -> WorkerResult<&[Number]> {
        self.classification = PrimeClassification::partition(numbers);

        if self.classification.has_primes() {
            self.publish_primes()?;
        }

        Ok(self.primes())
    }

    pub fn primes(&self) -> &[Number] {
        &self.classification.primes
    }

    pub fn non_primes(&self) -> &[Number] {
        &self.classification.non_primes
    }

    fn publish_primes(&self) -> WorkerResult<()> {
        let queue_url = self.config.primes_target()?;
        let message = OutboundMessage::for_primes(queue_url, &self.classification.primes)
            .map_err(PublishError::from)?;

        let status =
            self.publisher
                .send_message(&message.queue_url, &message.body, &message.attributes)?;

        if is_success_status(status) {
            info!(
                component = "classifier",
                event = "primes_published",
                queue_url,
                prime_count = self.classification.prime_count(),
                "Prime numbers sent to the target SQS!"
            );
        }
        Ok(())
    }
}

/// Production classifier: a fresh [`PrimeClassifier`] per record, publishing
/// through the shared publisher.
pub struct PublishingClassifier<'a> {
    config: &'a WorkerConfig,
    publisher: &'a dyn QueuePublisher,
}

impl<'a> PublishingClassifier<'a> {
    pub fn new(config: &'a WorkerConfig, publisher: &'a dyn QueuePublisher) -> Self {
        Self { config, publisher }
    }
}

impl RecordClassifier for PublishingClassifier<'_> {
    fn classify_record(&self, numbers: &[Number]) -> WorkerResult<Vec<Number>> {
        let mut classifier = PrimeClassifier::new(self.config, self.publisher);
        classifier.classify(numbers).map(<[Number]>::to_vec)
    }
}
