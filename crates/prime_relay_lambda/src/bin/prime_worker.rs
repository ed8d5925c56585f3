use aws_config::{BehaviorVersion, Region};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use prime_relay_lambda::adapters::sqs_publisher::SqsQueuePublisher;
use prime_relay_lambda::config::WorkerConfig;
use prime_relay_lambda::handlers::classifier::PublishingClassifier;
use prime_relay_lambda::handlers::dispatcher::handle_sqs_event;
use prime_relay_lambda::telemetry::init_tracing;
use serde_json::Value;
use tracing::info;

struct RuntimeDependencies {
    config: WorkerConfig,
    publisher: SqsQueuePublisher,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<Value, Error> {
    let classifier = PublishingClassifier::new(&deps.config, &deps.publisher);
    let report = handle_sqs_event(event.payload, &classifier);

    serde_json::to_value(report)
        .map_err(|error| Error::from(format!("failed to serialize batch report: {error}")))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = WorkerConfig::from_env()?;
    init_tracing(&config.log_level).map_err(Error::from)?;

    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;
    info!(
        component = "prime_worker",
        region = %config.region,
        primes_target_configured = config.primes_target.is_some(),
        "worker configured"
    );

    let deps = RuntimeDependencies {
        publisher: SqsQueuePublisher::new(
            aws_sdk_sqs::Client::new(&aws_config),
            config.delay_seconds,
        ),
        config,
    };
    let deps = &deps;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}
