//! An asynchronous micro HTTP/1.1 client for keep-alive connections
//!
//! This crate provides a small HTTP/1.1 client built on top of tokio. It sends
//! requests over one persistent connection, strictly one after another, and
//! frames every response body by its `Content-Length`.
//!
//! # Features
//!
//! - HTTP/1.1 request encoding with title-cased header names
//! - Response decoding with `httparse`
//! - Keep-alive connections, following the server's `Connection` header
//! - `Content-Length` body framing: a body is returned only once every declared byte arrived
//! - Clean error handling when the server closes the connection mid-response
//!
//! # Example
//!
//! ```no_run
//! use micro_http_client::connection::ClientConnection;
//! use tokio::net::TcpStream;
//! use tracing::{error, info};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_stream = match TcpStream::connect("127.0.0.1:6969").await {
//!         Ok(tcp_stream) => tcp_stream,
//!         Err(e) => {
//!             error!(cause = %e, "connect server error");
//!             return;
//!         }
//!     };
//!
//!     let (reader, writer) = tcp_stream.into_split();
//!     let mut connection = ClientConnection::new(reader, writer);
//!
//!     for _ in 0..3 {
//!         match connection.get("/", "127.0.0.1:6969").await {
//!             Ok(response) => info!(status = %response.status(), body_size = response.body().len(), "received response"),
//!             Err(e) => {
//!                 error!(cause = %e, "request failed");
//!                 return;
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`connection`]: Request/response exchange over one keep-alive connection
//! - [`protocol`]: Protocol types and abstractions
//! - [`codec`]: Protocol encoding/decoding implementation
//!
//! ## Error Handling
//!
//! The crate uses custom error types that implement `std::error::Error`:
//!
//! - [`protocol::HttpError`]: Top-level error type
//! - [`protocol::ParseError`]: Response parsing errors
//! - [`protocol::SendError`]: Request sending errors
//!
//! # Limitations
//!
//! - HTTP/1.1 only
//! - No TLS support
//! - No chunked transfer encoding
//! - Maximum header size: 8KB
//! - Maximum number of headers: 64

pub mod codec;
pub mod connection;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
