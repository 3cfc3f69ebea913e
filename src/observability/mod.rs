//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; one access line per request
//! - Request ID flows through all log events for correlation
//! - `RUST_LOG` overrides the configured level

pub mod logging;
