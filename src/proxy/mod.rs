//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Matched request + rewritten path
//!     → forwarder.rs (build upstream URI, set Host)
//!     → hyper client (connection pooling, keep-alive)
//!     → backend response relayed byte-for-byte
//!     → X-Gateway header added on the way back
//!
//! Transport failure → 502 response, never a propagated error
//! ```

pub mod forwarder;

pub use forwarder::{upstream_client, Forwarder, HttpClient};
