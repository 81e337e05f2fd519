use std::io::Write;

use bytes::Bytes;
use http::Response;
use micro_http_client::connection::ClientConnection;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::report;

/// Totals of a finished probe run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSummary {
    /// Number of completed request/response exchanges
    pub requests: u64,
    /// Number of body bytes received over all responses
    pub body_bytes: u64,
}

impl ProbeSummary {
    fn record(&mut self, response: &Response<Bytes>) {
        self.requests += 1;
        self.body_bytes += response.body().len() as u64;
    }
}

/// Drives sequential `GET` requests over a single keep-alive connection.
///
/// Every request is fully sent and its response fully received before the next
/// one starts. The first failure ends the run, there is no retry or reconnect.
#[derive(Debug)]
pub struct Probe {
    config: ProbeConfig,
}

impl Probe {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Connects to the configured server and runs every request, writing a report to `out`.
    ///
    /// # Errors
    ///
    /// Fails if the connection can't be established, an exchange fails, or
    /// the report can't be written.
    pub async fn run<O: Write>(&self, out: &mut O) -> Result<ProbeSummary, ProbeError> {
        let addr = self.config.authority();
        info!(host = %self.config.host, port = self.config.port, "connecting");

        let tcp_stream =
            TcpStream::connect((self.config.host.as_str(), self.config.port)).await.map_err(|e| ProbeError::connect(&addr, e))?;
        if let Ok(local_addr) = tcp_stream.local_addr() {
            info!(%local_addr, "connected");
        }

        let (reader, writer) = tcp_stream.into_split();
        self.exchange(ClientConnection::new(reader, writer), out).await
    }

    /// Runs every request over an established connection.
    ///
    /// # Errors
    ///
    /// Fails on the first exchange error or report write error.
    pub async fn exchange<R, W, O>(&self, mut connection: ClientConnection<R, W>, out: &mut O) -> Result<ProbeSummary, ProbeError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
        O: Write,
    {
        let authority = self.config.authority();
        let mut summary = ProbeSummary::default();

        for path in self.config.paths.iter().cycle().take(self.config.requests) {
            let request = summary.requests + 1;
            debug!(request, %path, "sending request");
            report::write_request(out, path)?;

            let response = connection.get(path, &authority).await.map_err(|e| ProbeError::exchange(request, path, e))?;
            debug!(request, status = %response.status(), body_size = response.body().len(), "received response");

            summary.record(&response);
            report::write_response(out, &response, self.config.print_body)?;
            out.flush()?;
        }

        info!(requests = summary.requests, body_bytes = summary.body_bytes, "probe finished");
        Ok(summary)
    }
}
