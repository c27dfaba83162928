//! Session types shared across Stockroom services.
//!
//! Provides the signed session-token codec, the sliding-window `SessionManager`,
//! session cookie builders, and the `SessionIdentity` extractor.

pub mod cookie;
pub mod identity;
pub mod session;
pub mod token;
