//! Backend dispatch probe entry point.
//!
//! Connects to the backend dispatch service, sends one framed command, and
//! waits for a response frame whose payload contains the success marker.
//! This is the quickest way to check from a shell that the dispatch
//! service is up and actually routing commands to its backend.
//!
//! # Usage
//!
//! ```text
//! lanadmin-probe [OPTIONS]
//!
//! Options:
//!   --host <HOST>              Dispatch service host [default: 127.0.0.1]
//!   --port <PORT>              Dispatch service TCP port [default: 9091]
//!   --command <TEXT>           Command payload [default: "file_list ."]
//!   --success-marker <TEXT>    Substring marking success [default: "DATA:FILES:"]
//!   --client-id <ID>           Client id attached to frames [default: 100]
//!   --backend-id <ID>          Backend instance to target [default: 1]
//!   --connect-timeout <SECS>   Connect timeout [default: 5]
//!   --response-timeout <SECS>  Total wait for a matching reply [default: 5]
//! ```
//!
//! Exit status: 0 when a matching response arrived; nonzero when the
//! deadline elapsed or the session failed.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lanadmin_probe::client::{
    ProbeClient, ProbeConfig, ProbeOutcome, DEFAULT_BACKEND_HOST, DEFAULT_BACKEND_ID,
    DEFAULT_BACKEND_PORT, DEFAULT_CLIENT_ID, DEFAULT_COMMAND, DEFAULT_SUCCESS_MARKER,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Diagnostic probe for the backend dispatch service.
///
/// Sends one framed command over TCP and reports whether a matching
/// response arrived within the deadline.
#[derive(Debug, Parser)]
#[command(
    name = "lanadmin-probe",
    about = "Probe the backend dispatch service with one framed command",
    version
)]
struct Cli {
    /// Hostname or IP address of the dispatch service.
    #[arg(long, default_value = DEFAULT_BACKEND_HOST, env = "LANADMIN_PROBE_HOST")]
    host: String,

    /// TCP port of the dispatch service.
    #[arg(long, default_value_t = DEFAULT_BACKEND_PORT, env = "LANADMIN_PROBE_PORT")]
    port: u16,

    /// Command payload sent in the probe frame.
    #[arg(long, default_value = DEFAULT_COMMAND)]
    command: String,

    /// Substring that marks a successful response payload.
    #[arg(long, default_value = DEFAULT_SUCCESS_MARKER)]
    success_marker: String,

    /// Client identifier attached to outgoing frames.
    #[arg(long, default_value_t = DEFAULT_CLIENT_ID)]
    client_id: u32,

    /// Backend instance identifier the probe targets.
    #[arg(long, default_value_t = DEFAULT_BACKEND_ID)]
    backend_id: u32,

    /// Connect timeout in seconds.
    #[arg(long, default_value_t = 5, env = "LANADMIN_PROBE_CONNECT_TIMEOUT")]
    connect_timeout: u64,

    /// Total time to wait for a matching response, in seconds.
    #[arg(long, default_value_t = 5, env = "LANADMIN_PROBE_RESPONSE_TIMEOUT")]
    response_timeout: u64,
}

impl Cli {
    /// Converts the parsed arguments into a [`ProbeConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error when `--host`/`--port` do not form a valid socket
    /// address.
    fn probe_config(&self) -> anyhow::Result<ProbeConfig> {
        let backend_addr: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid backend address: '{}:{}'", self.host, self.port))?;

        Ok(ProbeConfig {
            backend_addr,
            client_id: self.client_id,
            backend_id: self.backend_id,
            connect_timeout: Duration::from_secs(self.connect_timeout),
            response_timeout: Duration::from_secs(self.response_timeout),
            ..ProbeConfig::default()
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging; level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.probe_config()?;

    info!(
        "probing backend dispatch service at {} (command {:?})",
        config.backend_addr, cli.command
    );

    let mut client = ProbeClient::connect(config).await?;
    client.send_command(&cli.command).await?;

    match client.poll_for_response(&cli.success_marker).await? {
        ProbeOutcome::Success { response } => {
            println!("{response}");
            info!("backend probe succeeded");
            Ok(())
        }
        ProbeOutcome::TimedOut { waited } => {
            anyhow::bail!(
                "no response containing {:?} within {waited:?}",
                cli.success_marker
            )
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_produce_correct_endpoint() {
        let cli = Cli::parse_from(["lanadmin-probe"]);
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 9091);
    }

    #[test]
    fn test_cli_defaults_produce_correct_ids() {
        let cli = Cli::parse_from(["lanadmin-probe"]);
        assert_eq!(cli.client_id, 100);
        assert_eq!(cli.backend_id, 1);
    }

    #[test]
    fn test_cli_defaults_produce_correct_command_and_marker() {
        let cli = Cli::parse_from(["lanadmin-probe"]);
        assert_eq!(cli.command, "file_list .");
        assert_eq!(cli.success_marker, "DATA:FILES:");
    }

    #[test]
    fn test_cli_default_config_round_trips_to_probe_config() {
        let cli = Cli::parse_from(["lanadmin-probe"]);
        let config = cli.probe_config().expect("defaults must be valid");
        assert_eq!(config.backend_addr.to_string(), "127.0.0.1:9091");
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.response_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_cli_overridden_port_is_honored() {
        let cli = Cli::parse_from(["lanadmin-probe", "--port", "9999"]);
        let config = cli.probe_config().expect("valid");
        assert_eq!(config.backend_addr.port(), 9999);
    }

    #[test]
    fn test_cli_invalid_host_is_rejected() {
        let cli = Cli::parse_from(["lanadmin-probe", "--host", "not a host"]);
        assert!(cli.probe_config().is_err());
    }
}
