//! A diagnostic client for HTTP/1.1 keep-alive servers
//!
//! `micro-probe` opens a single TCP connection, sends `GET` requests over it one
//! after another and prints every response. A response is printed only after
//! its whole `Content-Length` body has arrived; a connection closed early ends
//! the run with an error instead of a truncated report.
//!
//! - [`config`]: command line arguments and the resolved [`ProbeConfig`]
//! - [`Probe`]: the request loop
//! - [`report`]: the stdout rendering of each exchange

pub mod config;
pub mod report;

mod error;
mod probe;

pub use config::{ProbeArgs, ProbeConfig};
pub use error::ProbeError;
pub use probe::{Probe, ProbeSummary};
