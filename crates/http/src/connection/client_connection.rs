use bytes::{Bytes, BytesMut};

use futures::{SinkExt, StreamExt};
use http::{Request, Response, StatusCode};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::codec::{RequestEncoder, ResponseDecoder};
use crate::ensure;
use crate::protocol::{
    HttpError, Message, ParseError, PayloadItem, PayloadSize, RequestHead, ResponseHeader, SendError, keep_alive_get,
};

use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, warn};

type RequestMessage = Message<(RequestHead, PayloadSize), Bytes>;

/// A client side HTTP/1.1 connection that reuses one stream for sequential requests
///
/// `ClientConnection` handles one request/response exchange at a time:
/// - Encoding and flushing the request
/// - Reading and decoding the response headers
/// - Collecting exactly `Content-Length` body bytes
/// - Tracking whether the server keeps the connection open
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct ClientConnection<R, W> {
    framed_read: FramedRead<R, ResponseDecoder>,
    framed_write: FramedWrite<W, RequestEncoder>,
    keep_alive: bool,
}

impl<R, W> ClientConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, ResponseDecoder::new(), 8 * 1024),
            framed_write: FramedWrite::new(writer, RequestEncoder::new()),
            keep_alive: true,
        }
    }

    /// Returns whether the last response allows another request on this connection
    pub fn is_keep_alive(&self) -> bool {
        self.keep_alive
    }

    /// Sends a keep-alive `GET` for `path` and waits for its full response.
    ///
    /// # Errors
    ///
    /// Fails if the request can't be built or sent, or if the response is
    /// malformed or cut short by the server closing the connection.
    pub async fn get(&mut self, path: &str, authority: &str) -> Result<Response<Bytes>, HttpError> {
        let request = keep_alive_get(path, authority).map_err(SendError::invalid_request)?;
        self.send_request(request).await?;
        self.receive_response().await
    }

    /// Encodes the request head and body, then flushes the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::KeepAliveRefused` if the previous response closed the
    /// connection, or a send error if writing fails.
    pub async fn send_request(&mut self, request: Request<Bytes>) -> Result<(), HttpError> {
        if !self.keep_alive {
            warn!("server closed the connection after the previous response");
            return Err(HttpError::KeepAliveRefused);
        }

        let (parts, body) = request.into_parts();
        let payload_size = if body.is_empty() { PayloadSize::Empty } else { PayloadSize::Length(body.len() as u64) };

        debug!(method = %parts.method, uri = %parts.uri, ?payload_size, "send request");
        let header = RequestMessage::Header((RequestHead::from_parts(parts, ()), payload_size));
        self.framed_write.feed(header).await?;

        if !payload_size.is_empty() {
            self.framed_write.feed(RequestMessage::Payload(PayloadItem::Chunk(body))).await?;
        }

        // using send instead of feed, because the request is complete and has to reach the server
        self.framed_write.send(RequestMessage::Payload(PayloadItem::Eof)).await?;
        Ok(())
    }

    /// Reads one complete response.
    ///
    /// Interim 1xx responses are read and skipped, so the returned response is
    /// always the final answer to the last request. The returned body holds
    /// exactly the number of bytes the Content-Length header declared; bytes
    /// that follow stay buffered for the next response.
    ///
    /// Any error leaves the connection unusable for further requests.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the response is malformed, switches protocols,
    /// or if the server closes the connection before the headers or the body
    /// are complete.
    pub async fn receive_response(&mut self) -> Result<Response<Bytes>, HttpError> {
        let result = self.read_final_response().await;
        if result.is_err() {
            self.keep_alive = false;
        }
        result
    }

    async fn read_final_response(&mut self) -> Result<Response<Bytes>, HttpError> {
        let (header, payload_size) = loop {
            let (header, payload_size) = self.read_header().await?;
            let status = header.status();
            if !status.is_informational() {
                break (header, payload_size);
            }

            ensure!(status != StatusCode::SWITCHING_PROTOCOLS, ParseError::switching_protocols().into());
            debug!(%status, "skip interim response");
            self.read_body(payload_size).await?;
        };

        debug!(status = %header.status(), ?payload_size, "received response header");
        self.keep_alive = header.is_keep_alive();

        let body = self.read_body(payload_size).await?;
        Ok(header.body(body))
    }

    async fn read_header(&mut self) -> Result<(ResponseHeader, PayloadSize), HttpError> {
        match self.framed_read.next().await {
            Some(Ok(Message::Header(header))) => Ok(header),
            Some(Ok(Message::Payload(_))) => Err(ParseError::invalid_header("need response header while receive body").into()),
            Some(Err(e)) => Err(e.into()),
            None => Err(ParseError::incomplete_header(0).into()),
        }
    }

    async fn read_body(&mut self, payload_size: PayloadSize) -> Result<Bytes, HttpError> {
        #[allow(clippy::cast_possible_truncation, reason = "the body is buffered in memory anyway")]
        let mut body = BytesMut::with_capacity(payload_size.len().min(64 * 1024) as usize);
        loop {
            match self.framed_read.next().await {
                Some(Ok(Message::Payload(PayloadItem::Chunk(bytes)))) => body.extend_from_slice(&bytes),
                Some(Ok(Message::Payload(PayloadItem::Eof))) => break,
                Some(Ok(Message::Header(_))) => {
                    return Err(ParseError::invalid_header("need response body while receive header").into());
                }
                Some(Err(e)) => return Err(e.into()),
                None => return Err(ParseError::incomplete_body(payload_size.len(), body.len() as u64).into()),
            }
        }

        debug_assert_eq!(body.len() as u64, payload_size.len());
        Ok(body.freeze())
    }
}
