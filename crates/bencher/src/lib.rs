//! Fixtures shared by the response decoder benchmarks.
//!
//! Every fixture is a complete response captured on disk, so one decode pass
//! covers the status line, the header block and the `Content-Length` body.

/// A raw HTTP response captured on disk, header block and body included.
#[derive(Debug, Copy, Clone)]
pub struct ResponseFixture {
    file_name: &'static str,
    content: &'static str,
    /// Criterion sample size, larger bodies take fewer samples
    sample_size: usize,
}

impl ResponseFixture {
    pub const fn new(file_name: &'static str, content: &'static str, sample_size: usize) -> Self {
        Self { file_name, content, sample_size }
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Length of the header block including the terminating `\r\n\r\n`
    pub fn header_len(&self) -> Option<usize> {
        self.content.find("\r\n\r\n").map(|offset| offset + 4)
    }

    /// Length of the body that follows the header block
    pub fn body_len(&self) -> Option<usize> {
        self.header_len().map(|header_len| self.content.len() - header_len)
    }
}

