//! HTTP response decoder module
//!
//! This module provides functionality for decoding HTTP responses using a streaming approach.
//! It handles both header parsing and payload decoding through a state machine pattern.
//!
//! # Components
//!
//! - [`ResponseDecoder`]: Main decoder that coordinates header and payload parsing
//! - Header parsing: Uses [`HeaderDecoder`] for parsing response headers
//! - Payload handling: Uses [`PayloadDecoder`] for handling response bodies if any
//!
//! # Example
//!
//! ```no_run
//! use micro_http_client::codec::ResponseDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = ResponseDecoder::new();
//! let mut buffer = BytesMut::new();
//! // ... add response data to buffer ...
//! let result = decoder.decode(&mut buffer);
//! ```

use crate::codec::body::PayloadDecoder;
use crate::codec::header::HeaderDecoder;
use crate::protocol::{Message, ParseError, PayloadItem, PayloadSize, ResponseHeader};
use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::debug;

/// A decoder for HTTP responses that handles both headers and payload
///
/// The decoder operates in two phases:
/// 1. Header parsing: Decodes the response headers using [`HeaderDecoder`]
/// 2. Payload parsing: Decodes the response body using [`PayloadDecoder`], always
///    ending with a [`PayloadItem::Eof`]
///
/// # State Machine
///
/// The decoder maintains its state through the `payload_decoder` field:
/// - `None`: Currently parsing headers
/// - `Some(PayloadDecoder)`: Currently parsing payload
///
/// Bytes following a complete response stay in the buffer for the next one.
#[derive(Debug)]
pub struct ResponseDecoder {
    header_decoder: HeaderDecoder,
    payload_decoder: Option<PayloadDecoder>,
}

impl ResponseDecoder {
    /// Creates a new `ResponseDecoder` instance
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self { header_decoder: HeaderDecoder, payload_decoder: None }
    }
}

impl ResponseDecoder {
    fn map_payload(&mut self, item: Option<PayloadItem>) -> Option<Message<(ResponseHeader, PayloadSize)>> {
        match item {
            Some(item @ PayloadItem::Chunk(_)) => Some(Message::Payload(item)),
            Some(item @ PayloadItem::Eof) => {
                // no need payload decoder in this response now
                self.payload_decoder.take();
                Some(Message::Payload(item))
            }
            None => None,
        }
    }
}

impl Decoder for ResponseDecoder {
    type Item = Message<(ResponseHeader, PayloadSize)>;
    type Error = ParseError;

    /// Attempts to decode an HTTP response from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Message::Header(_)))`: Successfully decoded response headers
    /// - `Ok(Some(Message::Payload(_)))`: Successfully decoded a payload chunk or the end of the body
    /// - `Ok(None)`: Need more data to proceed
    /// - `Err(_)`: Encountered a parsing error
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // parse payload if have payload_decoder
        if let Some(payload_decoder) = &mut self.payload_decoder {
            let item = payload_decoder.decode(src)?;
            return Ok(self.map_payload(item));
        }

        // parse response
        let message = match self.header_decoder.decode(src)? {
            Some((header, payload_size)) => {
                self.payload_decoder = Some(payload_size.into());
                Some(Message::Header((header, payload_size)))
            }
            None => None,
        };

        Ok(message)
    }

    /// Decodes what is left once the server has closed the connection.
    ///
    /// A closed connection is only acceptable between responses, which the
    /// caller observes by not polling; any state that still owes bytes fails.
    ///
    /// # Errors
    ///
    /// - `ParseError::IncompleteHeader` if the headers never completed
    /// - `ParseError::IncompleteBody` if the body is shorter than its Content-Length
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(payload_decoder) = &mut self.payload_decoder {
            let item = payload_decoder.decode_eof(src)?;
            return Ok(self.map_payload(item));
        }

        match self.decode(src)? {
            Some(message) => Ok(Some(message)),
            None => {
                debug!(received = src.len(), "connection closed while waiting for response header");
                Err(ParseError::incomplete_header(src.len()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::StatusCode;

    const TWO_RESPONSES: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhelloHTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n";

    fn collect(decoder: &mut ResponseDecoder, src: &mut BytesMut) -> (ResponseHeader, Bytes) {
        let Some(Message::Header((header, _))) = decoder.decode(src).unwrap() else {
            panic!("expect header");
        };

        let mut body = BytesMut::new();
        loop {
            match decoder.decode(src).unwrap() {
                Some(Message::Payload(PayloadItem::Chunk(bytes))) => body.extend_from_slice(&bytes),
                Some(Message::Payload(PayloadItem::Eof)) => break,
                other => panic!("unexpected message {other:?}"),
            }
        }
        (header, body.freeze())
    }

    #[test]
    fn decode_sequential_responses() {
        let mut decoder = ResponseDecoder::new();
        let mut src = BytesMut::from(TWO_RESPONSES);

        let (header, body) = collect(&mut decoder, &mut src);
        assert_eq!(header.status(), StatusCode::OK);
        assert_eq!(&body[..], b"hello");

        let (header, body) = collect(&mut decoder, &mut src);
        assert_eq!(header.status(), StatusCode::NOT_FOUND);
        assert!(body.is_empty());
        assert!(src.is_empty());
    }

    #[test]
    fn header_needs_more_data() {
        let mut decoder = ResponseDecoder::new();
        let mut src = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r"[..]);

        assert!(decoder.decode(&mut src).unwrap().is_none());

        src.extend_from_slice(b"\nhel");
        assert!(decoder.decode(&mut src).unwrap().unwrap().is_header());
        assert_eq!(&src[..], b"hel");
    }

    #[test]
    fn eof_mid_header() {
        let mut decoder = ResponseDecoder::new();
        let partial = b"HTTP/1.1 200 OK\r\nContent-";
        let mut src = BytesMut::from(&partial[..]);

        match decoder.decode_eof(&mut src) {
            Err(ParseError::IncompleteHeader { received }) => assert_eq!(received, partial.len()),
            other => panic!("expected incomplete header, got {other:?}"),
        }
    }

    #[test]
    fn eof_before_any_byte() {
        let mut decoder = ResponseDecoder::new();
        let mut src = BytesMut::new();
        assert!(matches!(decoder.decode_eof(&mut src), Err(ParseError::IncompleteHeader { received: 0 })));
    }

    #[test]
    fn eof_mid_body() {
        let mut decoder = ResponseDecoder::new();
        let mut src = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhel"[..]);

        assert!(decoder.decode_eof(&mut src).unwrap().unwrap().is_header());
        let chunk = decoder.decode_eof(&mut src).unwrap().unwrap().into_payload_item().unwrap();
        assert_eq!(chunk.as_bytes().unwrap().as_ref(), b"hel");

        assert!(matches!(decoder.decode_eof(&mut src), Err(ParseError::IncompleteBody { expected: 5, received: 3 })));
    }

    #[test]
    fn eof_after_complete_body() {
        let mut decoder = ResponseDecoder::new();
        let mut src = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok"[..]);

        assert!(decoder.decode_eof(&mut src).unwrap().unwrap().is_header());
        assert!(decoder.decode_eof(&mut src).unwrap().unwrap().is_payload());
        let eof = decoder.decode_eof(&mut src).unwrap().unwrap().into_payload_item().unwrap();
        assert!(eof.is_eof());
    }
}
