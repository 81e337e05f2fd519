use micro_http_client::protocol::HttpError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("can't connect to {addr}: {source}")]
    Connect { addr: String, source: io::Error },

    #[error("request #{request} for {path} failed: {source}")]
    Exchange { request: u64, path: String, source: HttpError },

    #[error("can't write report: {source}")]
    Report {
        #[from]
        source: io::Error,
    },
}

impl ProbeError {
    pub fn connect<S: ToString>(addr: S, source: io::Error) -> Self {
        Self::Connect { addr: addr.to_string(), source }
    }

    pub fn exchange<S: ToString>(request: u64, path: S, source: HttpError) -> Self {
        Self::Exchange { request, path: path.to_string(), source }
    }

    /// Returns true if the server closed the connection in the middle of a response
    pub fn is_early_close(&self) -> bool {
        matches!(self, Self::Exchange { source: HttpError::ResponseError { source }, .. } if source.is_incomplete())
    }
}
