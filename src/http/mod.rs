//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → request.rs (request ID)
//!     → routing layer decides backend
//!     → proxy layer forwards
//!     → headers.rs (CORS on every response, X-Gateway on proxied ones)
//!     → Send to client
//! ```

pub mod headers;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
