use micro_http_client::protocol::{HttpError, ParseError};
use micro_probe::{Probe, ProbeConfig, ProbeError, ProbeSummary};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const BODY: &str = "<html><head><title>this shit works</title></head><body>Hello, browser!</body></html>";

async fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut request = Vec::new();
    while !request.ends_with(b"\r\n\r\n") {
        match stream.read_u8().await {
            Ok(byte) => request.push(byte),
            Err(_) => return None,
        }
    }
    Some(String::from_utf8(request).unwrap())
}

fn config(port: u16, requests: usize) -> ProbeConfig {
    ProbeConfig { port, requests, ..ProbeConfig::default() }
}

#[tokio::test]
async fn sequential_requests_share_one_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut served = 0;
        while let Some(request) = read_request(&mut stream).await {
            assert_eq!(request, format!("GET / HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nConnection: keep-alive\r\n\r\n"));

            // header delimiter and body split over several segments
            let head = format!("HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r", BODY.len());
            stream.write_all(head.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();
            stream.write_all(b"\n").await.unwrap();
            stream.write_all(&BODY.as_bytes()[..10]).await.unwrap();
            stream.flush().await.unwrap();
            stream.write_all(&BODY.as_bytes()[10..]).await.unwrap();
            served += 1;
        }
        served
    });

    let probe = Probe::new(config(port, 3));
    let mut out = Vec::new();
    let summary = probe.run(&mut out).await.unwrap();

    assert_eq!(summary, ProbeSummary { requests: 3, body_bytes: 3 * BODY.len() as u64 });
    let report = String::from_utf8(out).unwrap();
    assert_eq!(report.matches(BODY).count(), 3);
    let head = format!("HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\n", BODY.len());
    assert_eq!(report.matches(&head).count(), 3);

    // the probe dropped its connection, so the server sees the end of the stream
    assert_eq!(server.await.unwrap(), 3);
}

#[tokio::test]
async fn server_closing_mid_body_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        read_request(&mut stream).await.unwrap();
        stream.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nonly a part").await.unwrap();
    });

    let mut out = Vec::new();
    let result = Probe::new(config(port, 2)).run(&mut out).await;

    assert!(matches!(
        result,
        Err(ProbeError::Exchange {
            request: 1,
            source: HttpError::ResponseError { source: ParseError::IncompleteBody { expected: 100, received: 11 } },
            ..
        })
    ));
    assert!(!String::from_utf8(out).unwrap().contains("only a part"));
}

#[tokio::test]
async fn server_closing_mid_header_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        read_request(&mut stream).await.unwrap();
        stream.write_all(b"HTTP/1.1 200 OK\r\nContent-Le").await.unwrap();
    });

    let result = Probe::new(config(port, 1)).run(&mut Vec::new()).await;

    assert!(matches!(
        result,
        Err(ProbeError::Exchange { source: HttpError::ResponseError { source: ParseError::IncompleteHeader { .. } }, .. })
    ));
}

#[tokio::test]
async fn server_asking_to_close_ends_the_run() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        read_request(&mut stream).await.unwrap();
        stream.write_all(b"HTTP/1.1 200 OK\r\nConnection: close\r\nContent-Length: 3\r\n\r\nbye").await.unwrap();
    });

    let mut out = Vec::new();
    let result = Probe::new(config(port, 2)).run(&mut out).await;

    assert!(matches!(result, Err(ProbeError::Exchange { request: 2, source: HttpError::KeepAliveRefused, .. })));
    assert!(String::from_utf8(out).unwrap().contains("bye"));
}

#[tokio::test]
async fn connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let result = Probe::new(config(port, 1)).run(&mut Vec::new()).await;
    assert!(matches!(result, Err(ProbeError::Connect { .. })));
}
