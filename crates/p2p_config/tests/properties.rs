//! Property tests for listen validation and instance port derivation

use p2p_config::{NetworkConfig, NetworkConfigError, NetworkPorts, Validate};
use proptest::prelude::*;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

fn config_with(host: String, port: i32) -> NetworkConfig {
    NetworkConfig {
        listen_host: host,
        listen_port: port,
        ..NetworkConfig::default()
    }
}

fn valid_host() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("0.0.0.0".to_string()),
        any::<[u8; 4]>().prop_map(|o| Ipv4Addr::from(o).to_string()),
        any::<[u16; 8]>().prop_map(|s| Ipv6Addr::from(s).to_string()),
    ]
}

proptest! {
    #[test]
    fn non_ip_hosts_are_rejected(host in "[a-zA-Z_-][a-zA-Z0-9._-]{0,40}") {
        prop_assume!(host.parse::<IpAddr>().is_err());
        let result = config_with(host.clone(), 9000).validate();
        prop_assert!(matches!(result, Err(NetworkConfigError::InvalidListenHost(h)) if h == host));
    }

    #[test]
    fn reserved_ports_are_rejected(host in valid_host(), port in 1i32..=1023) {
        let result = config_with(host, port).validate();
        prop_assert!(matches!(result, Err(NetworkConfigError::InvalidPort(p)) if p == port));
    }

    #[test]
    fn unreserved_ports_pass(host in valid_host(), port in prop_oneof![Just(0i32), 1024i32..=65535]) {
        prop_assert!(config_with(host, port).validate().is_ok());
    }

    #[test]
    fn out_of_range_ports_are_rejected(
        port in prop_oneof![i32::MIN..0, 65536i32..=i32::MAX]
    ) {
        let result = config_with("127.0.0.1".to_string(), port).validate();
        prop_assert!(matches!(result, Err(NetworkConfigError::InvalidPort(p)) if p == port));
    }

    #[test]
    fn derived_ports_follow_bases(instance_id in 0u32..100_000) {
        let ports = NetworkPorts::default();
        prop_assert_eq!(ports.p2p_port(instance_id), 51500 + instance_id);
        prop_assert_eq!(ports.bootstrap_node_port(instance_id), 50500 + instance_id);
        prop_assert_eq!(ports.rpc_port(instance_id), 52500 + instance_id);
    }

    #[test]
    fn detailed_report_agrees_with_gate(host in valid_host(), port in -10i32..70000) {
        let config = config_with(host, port);
        prop_assert_eq!(config.validate_detailed().is_valid, config.validate().is_ok());
    }
}

#[test]
fn derived_ports_distinct_for_co_located_instances() {
    let ports = NetworkPorts::default();
    for instance_id in 0..=999 {
        let bootstrap = ports.bootstrap_node_port(instance_id);
        let p2p = ports.p2p_port(instance_id);
        let rpc = ports.rpc_port(instance_id);
        assert_ne!(bootstrap, p2p);
        assert_ne!(p2p, rpc);
        assert_ne!(bootstrap, rpc);
    }
}

#[test]
fn multiaddr_for_loopback() {
    let config = config_with("127.0.0.1".to_string(), 9000);
    assert_eq!(config.multiaddr(), "/ip4/127.0.0.1/tcp/9000");
}

#[test]
fn canned_profiles_pass_unmodified() {
    assert!(NetworkConfig::new().validate().is_ok());
    assert!(NetworkConfig::bootnode(None).validate().is_ok());
}
