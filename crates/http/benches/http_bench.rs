use bytes::{Bytes, BytesMut};
use criterion::{Criterion, criterion_group, criterion_main};
use futures::executor::block_on;
use micro_http_client::{
    codec::{RequestEncoder, ResponseDecoder},
    connection::ClientConnection,
    protocol::{Message, PayloadItem, PayloadSize, RequestHead, keep_alive_get},
};
use std::{
    hint::black_box,
    io,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio_util::codec::{Decoder, Encoder};

const RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 12\r\nConnection: keep-alive\r\n\r\nHello World!";

// Mock IO for testing
#[derive(Clone)]
struct MockIO {
    read_data: Vec<u8>,
    write_data: Vec<u8>,
    read_pos: usize,
}

impl MockIO {
    fn new(read_data: Vec<u8>) -> Self {
        Self { read_data, write_data: Vec::new(), read_pos: 0 }
    }
}

impl AsyncRead for MockIO {
    fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let remaining = &self.read_data[self.read_pos..];
        let amt = std::cmp::min(remaining.len(), buf.remaining());
        buf.put_slice(&remaining[..amt]);
        self.read_pos += amt;
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockIO {
    fn poll_write(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<Result<usize, io::Error>> {
        self.write_data.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }
}

fn bench_response_decoder(c: &mut Criterion) {
    c.bench_function("decode_simple_response", |b| {
        b.iter(|| {
            let mut decoder = ResponseDecoder::new();
            let mut bytes = BytesMut::from(RESPONSE);
            black_box(decoder.decode(&mut bytes).unwrap());
            black_box(decoder.decode(&mut bytes).unwrap());
        });
    });
}

fn bench_request_encoder(c: &mut Criterion) {
    let request = keep_alive_get("/", "127.0.0.1:6969").unwrap();

    c.bench_function("encode_keep_alive_get", |b| {
        b.iter(|| {
            let mut encoder = RequestEncoder::new();
            let mut bytes = BytesMut::new();
            let (parts, _body) = request.clone().into_parts();
            let message = Message::<_, Bytes>::Header((RequestHead::from_parts(parts, ()), PayloadSize::Empty));
            encoder.encode(message, &mut bytes).unwrap();
            encoder.encode(Message::<(RequestHead, PayloadSize), Bytes>::Payload(PayloadItem::Eof), &mut bytes).unwrap();
            black_box(bytes);
        });
    });
}

fn bench_client_connection(c: &mut Criterion) {
    c.bench_function("keep_alive_get", |b| {
        b.iter(|| {
            let mock_io = MockIO::new(RESPONSE.to_vec());
            let (reader, writer) = (mock_io.clone(), mock_io);
            let mut connection = ClientConnection::new(reader, writer);
            black_box(block_on(connection.get("/", "127.0.0.1:6969")).unwrap());
        });
    });
}

criterion_group!(benches, bench_response_decoder, bench_request_encoder, bench_client_connection);
criterion_main!(benches);
