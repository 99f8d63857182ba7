//! Integration tests for the wake pipeline: registry lookup → MAC parse →
//! magic packet → UDP delivery, using real loopback sockets and temp-dir
//! registry files.

use std::net::UdpSocket;
use std::path::PathBuf;
use std::time::Duration;

use lanadmin_core::{MacAddress, MagicPacket};
use lanadmin_wake::commands;
use lanadmin_wake::registry::{MachineRecord, MachineRegistry};
use lanadmin_wake::sender::WakeConfig;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lanadmin_it_{tag}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// Binds a loopback receiver standing in for the broadcast segment.
fn loopback_receiver() -> (UdpSocket, WakeConfig) {
    let receiver = UdpSocket::bind("127.0.0.1:0").expect("bind receiver");
    receiver
        .set_read_timeout(Some(Duration::from_secs(2)))
        .expect("set timeout");
    let config = WakeConfig {
        broadcast_addr: "127.0.0.1".to_string(),
        port: receiver.local_addr().expect("local addr").port(),
    };
    (receiver, config)
}

#[test]
fn test_wake_by_name_delivers_the_configured_machines_packet() {
    // Arrange: a registry with one machine, persisted and re-loaded the way
    // the binary does it.
    let dir = temp_dir("wake_by_name");
    let path = dir.join("machines.json");
    let mut registry = MachineRegistry::default();
    registry.insert(
        "backoffice",
        MachineRecord {
            mac: "00-11-22-33-44-55".to_string(),
            ip: "10.0.0.7".to_string(),
            description: "Back-office PC".to_string(),
        },
    );
    registry.save(&path).expect("save registry");
    let loaded = MachineRegistry::load_or_empty(&path);

    let (receiver, config) = loopback_receiver();

    // Act
    let woke = commands::wake_by_name("backoffice", &loaded, &config);

    // Assert: the datagram on the wire is the machine's magic packet.
    assert!(woke);
    let mut buf = [0u8; 256];
    let (len, _) = receiver.recv_from(&mut buf).expect("datagram must arrive");
    let expected_mac: MacAddress = "00-11-22-33-44-55".parse().expect("valid MAC");
    assert_eq!(&buf[..len], MagicPacket::for_mac(expected_mac).as_bytes());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_wake_all_sends_one_packet_per_machine() {
    let (receiver, config) = loopback_receiver();
    let registry = MachineRegistry::sample();

    let (sent, total) = commands::wake_all(&registry, &config);
    assert_eq!((sent, total), (2, 2));

    let mut buf = [0u8; 256];
    for _ in 0..2 {
        let (len, _) = receiver.recv_from(&mut buf).expect("datagram must arrive");
        assert_eq!(len, 102);
        assert_eq!(&buf[..6], &[0xFF; 6]);
    }
}

#[test]
fn test_wake_all_skips_invalid_macs_but_continues() {
    let (receiver, config) = loopback_receiver();
    let mut registry = MachineRegistry::default();
    registry.insert(
        "broken",
        MachineRecord {
            mac: "not-a-mac".to_string(),
            ip: String::new(),
            description: String::new(),
        },
    );
    registry.insert(
        "healthy",
        MachineRecord {
            mac: "AA:BB:CC:DD:EE:0F".to_string(),
            ip: String::new(),
            description: String::new(),
        },
    );

    let (sent, total) = commands::wake_all(&registry, &config);
    assert_eq!((sent, total), (1, 2));

    let mut buf = [0u8; 256];
    let (len, _) = receiver.recv_from(&mut buf).expect("one datagram must arrive");
    assert_eq!(len, 102);
}

#[test]
fn test_unknown_name_against_degraded_registry_is_non_fatal() {
    // A corrupt registry file degrades to empty, and looking up any name
    // in it is a handled condition.
    let dir = temp_dir("degraded");
    let path = dir.join("machines.json");
    std::fs::write(&path, "{ this is not json").expect("write corrupt file");

    let registry = MachineRegistry::load_or_empty(&path);
    assert!(registry.is_empty());
    assert!(!commands::wake_by_name("pc1", &registry, &WakeConfig::default()));

    std::fs::remove_dir_all(&dir).ok();
}
