//! Logging helpers.

pub mod log_sanitizer;
