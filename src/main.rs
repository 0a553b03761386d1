//! simplenet: send one payload and print the response.
//!
//! ```text
//! simplenet [--config FILE] [--network tcp] [--tls] [--proxy HOST:PORT] ADDRESS [PAYLOAD]
//! ```
//!
//! The payload is taken verbatim from the argument, or read from stdin when
//! omitted. The response goes to stdout; failures go to stderr with their
//! step tag and a non-zero exit status.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use simplenet::config::{load_config, validate_config, SendConfig};
use simplenet::net::{self, Network};
use simplenet::observability::logging;

#[derive(Debug, Parser)]
#[command(name = "simplenet", version, about = "Send raw bytes and print the reply")]
struct Args {
    /// Target address (host:port).
    address: String,

    /// Payload to send. Read from stdin when omitted.
    payload: Option<String>,

    /// TOML file with defaults for the options below.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Socket kind: tcp, tcp4, tcp6, udp, udp4, udp6 (any case).
    #[arg(long)]
    network: Option<Network>,

    /// Use TLS without certificate verification.
    #[arg(long)]
    tls: bool,

    /// HTTP CONNECT proxy (host:port).
    #[arg(long)]
    proxy: Option<String>,

    #[arg(long)]
    connect_timeout_secs: Option<u64>,

    #[arg(long)]
    max_response_size: Option<usize>,

    /// Log level for this crate; RUST_LOG overrides.
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn apply(&self, config: &mut SendConfig) {
        if let Some(network) = self.network {
            config.network = network;
        }
        if self.tls {
            config.tls = true;
        }
        if let Some(proxy) = &self.proxy {
            config.proxy = Some(proxy.clone());
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout_secs = secs;
        }
        if let Some(size) = self.max_response_size {
            config.max_response_size = size;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SendConfig::default(),
    };
    args.apply(&mut config);
    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            eprintln!("invalid configuration: {error}");
        }
        return Ok(ExitCode::from(2));
    }

    logging::init(&config.log_level);

    let payload = match &args.payload {
        Some(payload) => payload.clone().into_bytes(),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let request = config.to_request(args.address.clone(), payload);
    tracing::info!(
        network = %request.network,
        address = %request.address,
        tls = request.tls,
        proxy = ?request.proxy,
        "Sending"
    );

    match net::send(&request).await {
        Ok(response) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(response.as_bytes())?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, step = e.step(), "Send failed");
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
