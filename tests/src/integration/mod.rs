//! End-to-end conversion tests against the public `il_core` API.

pub mod error_paths;
pub mod properties;
