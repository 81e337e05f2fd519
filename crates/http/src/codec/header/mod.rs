//! HTTP header processing module for encoding request heads and decoding response headers
//!
//! # Components
//!
//! - [`HeaderDecoder`]: Decodes HTTP response headers from raw bytes
//!   - Supports standard HTTP/1.1 status line and header format
//!   - Manages header size limits
//!   - Resolves `Content-Length` framing
//!
//! - [`HeaderEncoder`]: Encodes HTTP request heads to bytes
//!   - Implements standard HTTP/1.1 request line formatting
//!   - Manages the content-length header

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_encoder::HeaderEncoder;
