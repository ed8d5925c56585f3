//! AWS-oriented adapters and handlers for the prime relay worker.
//!
//! This crate owns runtime integration details (Lambda handler, SQS
//! publishing, configuration and logging) on top of the domain primitives in
//! `prime_relay_core`.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
pub mod telemetry;
