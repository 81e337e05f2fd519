//! HTTP codec module for encoding requests and decoding responses
//!
//! This module provides the client half of HTTP/1.1 message processing: request
//! encoding and response decoding. It uses a state machine pattern to handle both
//! headers and payload data.
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestEncoder`]: Encodes outgoing HTTP requests
//!   - Header encoding via [`header`] module
//!   - Payload encoding via [`body`] module
//!
//! - Response handling:
//!   - [`ResponseDecoder`]: Decodes incoming HTTP responses
//!   - Header parsing via [`header`] module
//!   - Payload decoding via [`body`] module
//!
//! # Example
//!
//! ```no_run
//! use micro_http_client::codec::{RequestEncoder, ResponseDecoder};
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! // Decode incoming response
//! let mut decoder = ResponseDecoder::new();
//! let mut response_buffer = BytesMut::new();
//! let response = decoder.decode(&mut response_buffer);
//!
//! // Encode outgoing request
//! let mut encoder = RequestEncoder::new();
//! let mut request_buffer = BytesMut::new();
//! // ... encode request ...
//! ```
//!
//! # Features
//!
//! - Streaming processing of HTTP messages
//! - Content-Length based payload handling
//! - Errors instead of truncated data when the connection closes mid-message

mod body;
mod header;
mod request_encoder;
mod response_decoder;

pub use request_encoder::RequestEncoder;
pub use response_decoder::ResponseDecoder;
