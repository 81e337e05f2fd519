//! HTTP response header handling implementation.
//!
//! This module provides the core abstractions for handling HTTP response headers
//! received by the client. It wraps the standard `http::Response` type to provide
//! additional functionality such as keep-alive inspection.

use bytes::Bytes;
use http::header::CONNECTION;
use http::response::Parts;
use http::{HeaderMap, Response, StatusCode, Version};

/// The header block exactly as the server sent it, from the status line up to
/// and including the terminating `\r\n\r\n`.
///
/// The decoder stores it in the response extensions, so the reason phrase,
/// header name casing and header order stay available after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeader(Bytes);

impl RawHeader {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the header block without its terminating empty line.
    pub fn head_lines(&self) -> &[u8] {
        self.0.strip_suffix(b"\r\n\r\n").unwrap_or(&self.0[..])
    }
}

impl From<Bytes> for RawHeader {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

/// Represents an HTTP response header.
///
/// This struct wraps a `http::Response<()>` to provide:
/// - Access to standard HTTP header fields
/// - Body attachment once the payload has been read
/// - Connection persistence inspection
#[derive(Debug)]
pub struct ResponseHeader {
    inner: Response<()>,
}

impl AsRef<Response<()>> for ResponseHeader {
    fn as_ref(&self) -> &Response<()> {
        &self.inner
    }
}

impl AsMut<Response<()>> for ResponseHeader {
    fn as_mut(&mut self) -> &mut Response<()> {
        &mut self.inner
    }
}

impl ResponseHeader {
    /// Consumes the header and returns the inner `Response<()>`.
    pub fn into_inner(self) -> Response<()> {
        self.inner
    }

    /// Attaches a body to this header, converting it into a full `Response<T>`.
    pub fn body<T>(self, body: T) -> Response<T> {
        self.inner.map(|()| body)
    }

    /// Returns the response's status code.
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Returns the response's HTTP version.
    pub fn version(&self) -> Version {
        self.inner.version()
    }

    /// Returns a reference to the response's headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Returns the header block as received, if the header was decoded from the wire.
    pub fn raw_header(&self) -> Option<&RawHeader> {
        self.inner.extensions().get::<RawHeader>()
    }

    /// Determines if the server allows another request on this connection.
    ///
    /// HTTP/1.1 connections persist unless `Connection: close` is present,
    /// HTTP/1.0 connections only persist with `Connection: keep-alive`.
    pub fn is_keep_alive(&self) -> bool {
        let mut close = false;
        let mut keep_alive = false;
        for value in self.headers().get_all(CONNECTION) {
            for token in value.as_bytes().split(|b| *b == b',') {
                let token = token.trim_ascii();
                close |= token.eq_ignore_ascii_case(b"close");
                keep_alive |= token.eq_ignore_ascii_case(b"keep-alive");
            }
        }

        match self.version() {
            Version::HTTP_10 => keep_alive && !close,
            _ => !close,
        }
    }

    /// Determines if this response carries no body regardless of its headers.
    ///
    /// Returns true for informational (1xx), `204 No Content` and `304 Not Modified`.
    pub fn is_bodyless(&self) -> bool {
        let status = self.status();
        status.is_informational() || status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED
    }
}

/// Converts response parts into a `ResponseHeader`.
impl From<Parts> for ResponseHeader {
    #[inline]
    fn from(parts: Parts) -> Self {
        Self { inner: Response::from_parts(parts, ()) }
    }
}

/// Converts a bodyless response into a `ResponseHeader`.
impl From<Response<()>> for ResponseHeader {
    #[inline]
    fn from(inner: Response<()>) -> Self {
        Self { inner }
    }
}
