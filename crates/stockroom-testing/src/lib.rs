//! Test utilities for Stockroom services.
//!
//! Session helpers for driving cookie-authenticated routes and response decoders.
//! Import from tests only, never from production code.

pub mod auth;
pub mod response;
