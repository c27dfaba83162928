//! Service plumbing shared by Stockroom services: tracing setup, request ids, health
//! probes, timestamp helpers and store-error classification.

pub mod datetime;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod tracing;
