//! Command line configuration of the probe.
//!
//! [`ProbeArgs`] is what `clap` parses; [`ProbeConfig`] is the plain value the
//! probe runs with, so tests can build one without going through argv.

use clap::Parser;

/// Host the probe connects to unless told otherwise
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the micro server listens on by default
pub const DEFAULT_PORT: u16 = 6969;

/// Number of requests sent over the connection unless told otherwise
pub const DEFAULT_REQUESTS: usize = 100_000_000;

#[derive(Parser, Debug)]
#[command(name = "micro-probe")]
#[command(about = "Send GET requests over one keep-alive connection and print every response", long_about = None)]
pub struct ProbeArgs {
    /// Server host
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Request path, repeat to cycle through several paths
    #[arg(long = "path", default_value = "/")]
    pub paths: Vec<String>,

    /// Number of requests to send before exiting
    #[arg(short = 'n', long, default_value_t = DEFAULT_REQUESTS)]
    pub requests: usize,

    /// Don't print response bodies
    #[arg(short, long)]
    pub quiet: bool,

    /// Log every request and response at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

/// Settings of one probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub host: String,
    pub port: u16,
    pub paths: Vec<String>,
    pub requests: usize,
    pub print_body: bool,
}

impl ProbeConfig {
    /// Value of the `Host` header, the port is left out when it is the http default
    pub fn authority(&self) -> String {
        let host = if self.host.contains(':') { format!("[{}]", self.host) } else { self.host.clone() };
        if self.port == 80 { host } else { format!("{host}:{}", self.port) }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            paths: vec!["/".to_string()],
            requests: DEFAULT_REQUESTS,
            print_body: true,
        }
    }
}

impl From<ProbeArgs> for ProbeConfig {
    fn from(args: ProbeArgs) -> Self {
        Self { host: args.host, port: args.port, paths: args.paths, requests: args.requests, print_body: !args.quiet }
    }
}
