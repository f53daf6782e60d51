//! A deferred, validating request builder for Discord webhook messages,
//! plus the interaction callback protocol types and a small reqwest-based
//! dispatcher.

pub mod model;
pub mod request;
pub mod shared;
