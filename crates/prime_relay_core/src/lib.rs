//! Shared prime relay domain primitives.
//!
//! This crate owns the deterministic part of the worker: inbound and outbound
//! message contracts, payload decoding, and the prime/non-prime partition.
//! It intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod classification;
pub mod contract;
