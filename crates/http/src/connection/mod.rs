//! HTTP client connection module
//!
//! This module provides the client side connection handling: one stream,
//! reused for request/response exchanges that never overlap.
//!
//! # Components
//!
//! - [`ClientConnection`]: Main connection handler that:
//!   - Encodes and flushes requests
//!   - Decodes responses with `Content-Length` framing
//!   - Follows the server's keep-alive decision
//!
//! # Features
//!
//! - Asynchronous I/O handling
//! - Keep-alive connection support
//! - Errors instead of truncated responses when the server closes early

mod client_connection;

pub use client_connection::ClientConnection;
