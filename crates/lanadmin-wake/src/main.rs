//! Wake-on-LAN utility entry point.
//!
//! Sends magic packets to power on machines over the local network, keyed
//! either by an explicit MAC address or by a name from the JSON machine
//! registry stored next to the executable.
//!
//! # Usage
//!
//! ```text
//! lanadmin-wake <MAC|NAME>     Wake one machine (e.g. AA:BB:CC:DD:EE:FF or pc1)
//! lanadmin-wake --all          Wake every machine in the registry
//! lanadmin-wake --list         List configured machines
//! lanadmin-wake --init         Create a sample registry file
//! lanadmin-wake --help         Show help
//! ```
//!
//! Invoked with no arguments, the tool prints its help text and exits
//! with status 1.  Every handled command path exits with status 0; that
//! includes waking an unknown name, which just prints a message.
//!
//! # Prerequisites on target machines
//!
//! 1. Enable WOL in BIOS/UEFI.
//! 2. Enable WOL in the network driver: `sudo ethtool -s eth0 wol g`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use lanadmin_wake::commands;
use lanadmin_wake::registry::{default_registry_path, MachineRegistry};
use lanadmin_wake::sender::{WakeConfig, DEFAULT_BROADCAST_ADDR, DEFAULT_WOL_PORT};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Wake machines on the local network with Wake-on-LAN magic packets.
#[derive(Debug, Parser)]
#[command(
    name = "lanadmin-wake",
    about = "Send Wake-on-LAN magic packets to machines on the local network",
    version
)]
struct Cli {
    /// MAC address (e.g. AA:BB:CC:DD:EE:FF) or configured machine name.
    target: Option<String>,

    /// Wake every machine in the registry.
    #[arg(long, conflicts_with = "target")]
    all: bool,

    /// List configured machines and exit.
    #[arg(long, conflicts_with_all = ["target", "all"])]
    list: bool,

    /// Create a sample registry file and exit.
    #[arg(long, conflicts_with_all = ["target", "all", "list"])]
    init: bool,

    /// UDP broadcast address magic packets are sent to.
    #[arg(long, default_value = DEFAULT_BROADCAST_ADDR, env = "LANADMIN_WAKE_BROADCAST")]
    broadcast: String,

    /// UDP destination port for magic packets.
    #[arg(long, default_value_t = DEFAULT_WOL_PORT, env = "LANADMIN_WAKE_PORT")]
    port: u16,

    /// Path to the machine registry JSON file.
    #[arg(long, env = "LANADMIN_WAKE_REGISTRY")]
    registry: Option<PathBuf>,
}

impl Cli {
    fn wake_config(&self) -> WakeConfig {
        WakeConfig {
            broadcast_addr: self.broadcast.clone(),
            port: self.port,
        }
    }

    fn registry_path(&self) -> PathBuf {
        self.registry.clone().unwrap_or_else(default_registry_path)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Structured logging; level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // No target and no command flag: show help, exit 1.  This is the only
    // invocation that fails; handled commands below all exit 0.
    if cli.target.is_none() && !cli.all && !cli.list && !cli.init {
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    }

    let config = cli.wake_config();
    let registry_path = cli.registry_path();

    if cli.init {
        commands::init_sample_registry(&registry_path);
        return ExitCode::SUCCESS;
    }

    if cli.list {
        let registry = MachineRegistry::load_or_empty(&registry_path);
        commands::list_machines(&registry);
        return ExitCode::SUCCESS;
    }

    if cli.all {
        let registry = MachineRegistry::load_or_empty(&registry_path);
        commands::wake_all(&registry, &config);
        return ExitCode::SUCCESS;
    }

    // A single target: MAC address or registry name.
    let target = cli.target.as_deref().unwrap_or_default();
    if commands::looks_like_mac(target) {
        commands::wake_by_mac(target, &config);
    } else {
        let registry = MachineRegistry::load_or_empty(&registry_path);
        commands::wake_by_name(target, &registry, &config);
    }
    ExitCode::SUCCESS
}

// ── Tests ─────────────────────────────────────────────────────────────────────
