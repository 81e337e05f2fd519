//! HTTP request head handling for the client side.
//!
//! Requests are plain `http::Request` values. The head is split from its body
//! before encoding, the same way a response head is represented by
//! `http::Response<()>` on the server side.

use bytes::Bytes;
use http::header::{CONNECTION, HOST};
use http::{HeaderValue, Method, Request, Version};

/// Type alias for HTTP request heads.
///
/// This type represents the header portion of an HTTP request, using
/// `http::Request<()>` with an empty body placeholder.
pub type RequestHead = Request<()>;

const KEEP_ALIVE: HeaderValue = HeaderValue::from_static("keep-alive");

/// Builds a bodyless `GET` request asking the server to keep the connection open.
///
/// The request carries exactly the `Host` and `Connection: keep-alive` headers.
///
/// # Errors
///
/// Returns an error if `path` is not a valid request target or `authority`
/// is not a valid header value.
pub fn keep_alive_get(path: &str, authority: &str) -> Result<Request<Bytes>, http::Error> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .version(Version::HTTP_11)
        .header(HOST, authority)
        .header(CONNECTION, KEEP_ALIVE)
        .body(Bytes::new())
}
