//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → table.rs (longest-prefix lookup)
//!     → rewrite.rs (strip matched prefix)
//!     → Return: matched Route or NoMatch
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Validate prefix and backend URL
//!     → Bind a Forwarder per backend (target parsed once)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Longest prefix wins; ties broken by registration order
//! - Deterministic: same input always matches same route

pub mod rewrite;
pub mod table;

pub use rewrite::rewrite;
pub use table::{Route, RouteTable};
