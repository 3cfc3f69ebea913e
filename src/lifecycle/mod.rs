//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Compile route table → Start listener
//!
//! Shutdown:
//!     Ctrl+C or Shutdown::trigger → Stop accepting → Drain → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener starts last (traffic only when routes are compiled)

pub mod shutdown;

pub use shutdown::Shutdown;
