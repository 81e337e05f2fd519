//! Human readable rendering of every exchange, written to stdout by the binary.

use bytes::Bytes;
use http::Response;
use micro_http_client::protocol::RawHeader;
use std::io;
use std::io::Write;

pub fn write_request<O: Write>(out: &mut O, path: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, ">>> Sending request for {path}")
}

pub fn write_response<O: Write>(out: &mut O, response: &Response<Bytes>, print_body: bool) -> io::Result<()> {
    writeln!(out, "=== Response Headers ===")?;
    // print the header block as the server sent it, rebuild it only for responses not read from the wire
    if let Some(raw) = response.extensions().get::<RawHeader>() {
        writeln!(out, "{}", String::from_utf8_lossy(raw.head_lines()))?;
    } else {
        writeln!(out, "{:?} {}", response.version(), response.status())?;
        for (name, value) in response.headers() {
            writeln!(out, "{name}: {}", String::from_utf8_lossy(value.as_bytes()))?;
        }
    }

    if print_body {
        writeln!(out, "=== Response Body ===")?;
        writeln!(out, "{}", String::from_utf8_lossy(response.body()))?;
    }
    writeln!(out, "=====================")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use indoc::indoc;

    fn response() -> Response<Bytes> {
        Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "text/html")
            .header("content-length", "12")
            .body(Bytes::from_static(b"Hello World!"))
            .unwrap()
    }

    #[test]
    fn full_report() {
        let mut out = Vec::new();
        write_request(&mut out, "/").unwrap();
        write_response(&mut out, &response(), true).unwrap();

        let expected = indoc! {"

        >>> Sending request for /
        === Response Headers ===
        HTTP/1.1 200 OK
        content-type: text/html
        content-length: 12
        === Response Body ===
        Hello World!
        =====================
        "};
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn quiet_report_skips_body() {
        let mut out = Vec::new();
        write_response(&mut out, &response(), false).unwrap();

        let report = String::from_utf8(out).unwrap();
        assert!(!report.contains("Hello World!"));
        assert!(report.ends_with("content-length: 12\n=====================\n"));
    }

    #[test]
    fn invalid_utf8_body_is_replaced() {
        let response = Response::new(Bytes::from_static(&[b'o', b'k', 0xff]));
        let mut out = Vec::new();
        write_response(&mut out, &response, true).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("ok\u{fffd}"));
    }

    #[test]
    fn prints_header_block_as_received() {
        let mut response = Response::new(Bytes::from_static(b"v"));
        *response.status_mut() = StatusCode::from_u16(599).unwrap();
        response
            .extensions_mut()
            .insert(RawHeader::from(Bytes::from_static(b"HTTP/1.1 599 Server Melted\r\nX-Custom-Thing: v\r\nContent-Length: 1\r\n\r\n")));

        let mut out = Vec::new();
        write_response(&mut out, &response, true).unwrap();

        let report = String::from_utf8(out).unwrap();
        assert_eq!(
            report,
            "=== Response Headers ===\nHTTP/1.1 599 Server Melted\r\nX-Custom-Thing: v\r\nContent-Length: 1\n=== Response Body ===\nv\n=====================\n"
        );
    }
}
