//! Error reporting.

mod client;

pub use client::with_sentry_configuration;
pub use sentry;
