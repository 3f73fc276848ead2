//! Shared fixtures for oncomatch tests.

pub mod patient;

pub use patient::{variant, PatientBuilder};

/// Re-exported so tests can `use oncomatch_test_utils::assert_eq;`.
pub use pretty_assertions::{assert_eq, assert_ne};

/// Parse a JSON fixture, panicking with the offending input on failure.
pub fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> T {
    serde_json::from_str(json).unwrap_or_else(|e| panic!("invalid fixture ({e}):\n{json}"))
}
