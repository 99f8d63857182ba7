//! The wake utility's command handlers.
//!
//! Each handler is one command path of the CLI: wake a single machine (by
//! MAC or by registry name), wake everything, list the registry, or write
//! the starter registry.  Handlers report to the console and fold
//! validation/network failures into a boolean result; nothing here aborts
//! the process.

use std::path::Path;

use lanadmin_core::{MacAddress, MagicPacket};
use tracing::info;

use crate::registry::MachineRegistry;
use crate::sender::{send_magic_packet, WakeConfig};

/// Decides whether a command-line target is a MAC address or a registry
/// name: anything containing `:` or `-`, or exactly 12 characters long,
/// is treated as a MAC.
pub fn looks_like_mac(target: &str) -> bool {
    target.contains(':') || target.contains('-') || target.len() == 12
}

/// Wakes a machine by explicit MAC address.
///
/// Returns `false` when the MAC fails validation or the send fails; both
/// are reported, neither is fatal.
pub fn wake_by_mac(mac: &str, config: &WakeConfig) -> bool {
    let parsed: MacAddress = match mac.parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {e}");
            return false;
        }
    };

    let packet = MagicPacket::for_mac(parsed);
    if send_magic_packet(&packet, config) {
        println!("magic packet sent to {parsed}");
        true
    } else {
        eprintln!("failed to wake {parsed}");
        false
    }
}

/// Wakes a machine by its registry name.
///
/// An unknown name is a handled condition: the available names are
/// printed and `false` is returned.
pub fn wake_by_name(name: &str, registry: &MachineRegistry, config: &WakeConfig) -> bool {
    let Some(record) = registry.lookup(name) else {
        println!("unknown machine: {name}");
        let names: Vec<&str> = registry.iter().map(|(n, _)| n.as_str()).collect();
        if names.is_empty() {
            println!("available machines: (none)");
        } else {
            println!("available machines: {}", names.join(", "));
        }
        return false;
    };

    info!("waking {name} ({})", record.mac);
    wake_by_mac(&record.mac, config)
}

/// Wakes every machine in the registry.
///
/// Returns `(sent, total)` so the caller can report a summary; per-machine
/// failures are already reported and do not stop the sweep.
pub fn wake_all(registry: &MachineRegistry, config: &WakeConfig) -> (usize, usize) {
    if registry.is_empty() {
        println!("no machines configured");
        return (0, 0);
    }

    println!("waking {} machine(s)...", registry.len());
    let mut sent = 0;
    for (name, record) in registry.iter() {
        print!("  {name}: ");
        if wake_by_mac(&record.mac, config) {
            sent += 1;
        }
    }
    println!("sent {sent}/{} wake packets", registry.len());
    (sent, registry.len())
}

/// Renders the registry as an aligned name/MAC/IP/description table.
pub fn format_machine_table(registry: &MachineRegistry) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<15} {:<20} {:<15} {}\n",
        "Name", "MAC Address", "IP", "Description"
    ));
    out.push_str(&"-".repeat(70));
    out.push('\n');
    for (name, record) in registry.iter() {
        out.push_str(&format!(
            "{:<15} {:<20} {:<15} {}\n",
            name, record.mac, record.ip, record.description
        ));
    }
    out
}

/// Prints the registry listing, or a hint when nothing is configured yet.
pub fn list_machines(registry: &MachineRegistry) {
    if registry.is_empty() {
        println!("no machines configured");
        println!("run with --init to create a sample registry");
        return;
    }
    print!("{}", format_machine_table(registry));
}

/// Writes the two-entry sample registry unless one already exists.
///
/// Returns `true` when a new file was written.  Failures are reported but
/// not propagated; the command path stays handled either way.
pub fn init_sample_registry(path: &Path) -> bool {
    if path.exists() {
        println!("registry already exists: {}", path.display());
        return false;
    }

    match MachineRegistry::sample().save(path) {
        Ok(()) => {
            println!("created sample registry: {}", path.display());
            println!("edit this file to add your machine MAC addresses");
            true
        }
        Err(e) => {
            eprintln!("error: could not write sample registry: {e}");
            false
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
