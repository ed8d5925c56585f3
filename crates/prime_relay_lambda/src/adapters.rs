pub mod publisher;
pub mod sqs_publisher;
