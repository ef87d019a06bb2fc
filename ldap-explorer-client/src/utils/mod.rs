//! Utility modules.

/// Log sanitization utilities to keep filters and values from flooding logs.
pub mod log_sanitizer;
