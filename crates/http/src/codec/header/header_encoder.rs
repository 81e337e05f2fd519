//! HTTP header encoder implementation for serializing HTTP request heads
//!
//! This module provides functionality for encoding HTTP request heads into raw bytes.
//! It handles serialization of the request line and headers, and manages the
//! Content-Length header according to the payload size.
//!
//! Header names are written in canonical title case (`Host`, `Content-Length`)
//! since `http::HeaderMap` stores them lowercased.

use crate::protocol::{PayloadSize, RequestHead, SendError};

use bytes::{BufMut, BytesMut};

use http::{HeaderValue, Version, header};
use std::io;
use std::io::{ErrorKind, Write};
use tokio_util::codec::Encoder;
use tracing::error;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 1024;

/// Encoder for HTTP request heads implementing the [`Encoder`] trait.
///
/// This encoder serializes a [`RequestHead`] and [`PayloadSize`] into raw bytes,
/// setting the Content-Length header when the request carries a body.
#[derive(Debug)]
pub struct HeaderEncoder;

impl Encoder<(RequestHead, PayloadSize)> for HeaderEncoder {
    type Error = SendError;

    /// Encodes an HTTP request head into the provided bytes buffer.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - HTTP version is not supported (only HTTP/1.1 supported)
    /// - Writing to buffer fails
    fn encode(&mut self, item: (RequestHead, PayloadSize), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (mut head, payload_size) = item;

        dst.reserve(INIT_HEADER_SIZE);
        match head.version() {
            Version::HTTP_11 => {
                let target = head.uri().path_and_query().map_or("/", |path_and_query| path_and_query.as_str());
                write!(FastWrite(dst), "{} {} HTTP/1.1\r\n", head.method(), target)?;
            }
            v => {
                error!(http_version = ?v, "unsupported http version");
                return Err(io::Error::from(ErrorKind::Unsupported).into());
            }
        }

        match payload_size {
            PayloadSize::Length(n) => {
                head.headers_mut().insert(header::CONTENT_LENGTH, n.into());
            }
            PayloadSize::Empty => {
                // a bodyless request states no length unless the caller set one explicitly
                if let Some(value) = head.headers_mut().get_mut(header::CONTENT_LENGTH) {
                    const ZERO_VALUE: HeaderValue = HeaderValue::from_static("0");
                    *value = ZERO_VALUE;
                }
            }
        }

        for (header_name, header_value) in head.headers() {
            put_title_case(dst, header_name.as_str().as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Writes a lowercase header name with the first letter of every `-` separated word uppercased.
fn put_title_case(dst: &mut BytesMut, name: &[u8]) {
    dst.reserve(name.len());
    let mut upper = true;
    for &byte in name {
        if upper {
            dst.put_u8(byte.to_ascii_uppercase());
        } else {
            dst.put_u8(byte);
        }
        upper = byte == b'-';
    }
}

/// Fast writer implementation for writing to `BytesMut`.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
