//! Utility modules.

/// Timestamp serialization helpers for Halo payloads.
pub mod datetime;

/// Log sanitization utilities to keep post bodies out of debug logs.
pub mod log_sanitizer;
