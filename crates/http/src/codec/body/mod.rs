//! HTTP body handling module for request and response payloads
//!
//! Bodies are framed by `Content-Length` only.
//!
//! # Components
//!
//! ## Decoders
//! - [`LengthDecoder`]: Processes fixed-length response payloads
//! - [`PayloadDecoder`]: Selects between fixed-length and bodyless responses
//!
//! ## Encoders
//! - [`LengthEncoder`]: Handles fixed-length request payload encoding
//! - [`PayloadEncoder`]: Selects between fixed-length and bodyless requests

mod length_decoder;
mod length_encoder;
mod payload_decoder;
mod payload_encoder;

pub use payload_decoder::PayloadDecoder;
pub use payload_encoder::PayloadEncoder;
