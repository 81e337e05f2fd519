use std::io::{BufWriter, stdout};
use std::process::ExitCode;

use clap::Parser;
use micro_probe::{Probe, ProbeArgs, ProbeConfig};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = ProbeArgs::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).with_writer(std::io::stderr).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
        return ExitCode::FAILURE;
    }

    let probe = Probe::new(ProbeConfig::from(args));
    info!(paths = ?probe.config().paths, requests = probe.config().requests, "start probing");

    let mut out = BufWriter::new(stdout());
    match probe.run(&mut out).await {
        Ok(summary) => {
            info!(requests = summary.requests, body_bytes = summary.body_bytes, "all responses received");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_early_close() => {
            error!(cause = %e, "server closed the connection mid-response");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(cause = %e, "probe failed, connection shutdown");
            ExitCode::FAILURE
        }
    }
}
