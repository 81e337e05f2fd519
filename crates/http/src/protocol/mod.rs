//! Core HTTP protocol abstractions for the client side.
//!
//! This module provides the building blocks the codec and the connection share:
//! message framing, request and response heads, and error types.
//!
//! # Architecture
//!
//! - **Message Handling** ([`message`]): Core message types and payload processing
//!   - [`Message`]: Represents either headers or payload chunks
//!   - [`PayloadItem`]: Handles individual payload chunks and EOF
//!   - [`PayloadSize`]: Tracks `Content-Length` framing information
//!
//! - **Request Processing** ([`request`]): Request head handling
//!   - [`RequestHead`]: Type alias for request heads before body attachment
//!   - [`keep_alive_get`]: Builds the probe's `GET` request
//!
//! - **Response Processing** ([`response`]): Response header handling
//!   - [`ResponseHeader`]: Wraps HTTP response headers with keep-alive inspection
//!   - [`RawHeader`]: The header block as the server sent it
//!
//! - **Error Handling** ([`error`]):
//!   - [`HttpError`]: Top-level error type
//!   - [`ParseError`]: Response parsing errors, including early connection close
//!   - [`SendError`]: Request sending errors

mod message;
pub use message::Message;
pub use message::PayloadItem;
pub use message::PayloadSize;

mod request;
pub use request::RequestHead;
pub use request::keep_alive_get;

mod response;
pub use response::RawHeader;
pub use response::ResponseHeader;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
