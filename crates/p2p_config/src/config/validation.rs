//! Field-level checks shared by the validation gate and the detailed report

use crate::error::NetworkConfigError;
use std::net::{IpAddr, SocketAddr};

/// Listen on every interface.
pub const WILDCARD_HOST: &str = "0.0.0.0";

pub const MAX_PORT: i32 = 65535;

/// Ports below this (other than 0) are reserved.
pub const FIRST_UNRESERVED_PORT: i32 = 1024;

const MAX_HOSTNAME_LEN: usize = 255;
const MAX_LABEL_LEN: usize = 63;

/// Accepts the wildcard or any IPv4/IPv6 literal.
pub fn check_listen_host(host: &str) -> Result<(), NetworkConfigError> {
    if host == WILDCARD_HOST || host.parse::<IpAddr>().is_ok() {
        return Ok(());
    }
    Err(NetworkConfigError::InvalidListenHost(host.to_string()))
}

/// Accepts 0 (any) and the unreserved range `1024..=65535`.
pub fn check_listen_port(port: i32) -> Result<(), NetworkConfigError> {
    match port {
        0 | FIRST_UNRESERVED_PORT..=MAX_PORT => Ok(()),
        _ => Err(NetworkConfigError::InvalidPort(port)),
    }
}

/// Generic DNS length limits only: the whole name is at most 255 bytes and
/// every dot-separated label at most 63. Character classes are not checked.
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    hostname.split('.').all(|label| label.len() <= MAX_LABEL_LEN)
}

/// Shape check for a `host:port` peer entry, returning the reason it is
/// malformed. Used for advisory warnings, never for the startup gate.
pub fn check_peer_entry(entry: &str) -> Result<(), String> {
    if entry.parse::<SocketAddr>().is_ok() {
        return Ok(());
    }

    // a bare IPv6 literal would otherwise split into host and port
    if entry.parse::<IpAddr>().is_ok() {
        return Err(format!("'{entry}' is missing a port"));
    }

    let Some((host, port)) = entry.rsplit_once(':') else {
        return Err(format!("'{entry}' is missing a port"));
    };

    if port.parse::<u16>().is_err() {
        return Err(format!("'{entry}' has an invalid port '{port}'"));
    }

    if host.is_empty() {
        return Err(format!("'{entry}' is missing a host"));
    }

    if host.contains(':') {
        return Err(format!("'{entry}' has an IPv6 host without brackets"));
    }

    if host.parse::<IpAddr>().is_err() && !is_valid_hostname(host) {
        return Err(format!("'{entry}' has an invalid hostname"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_and_ip_literals_are_valid_hosts() {
        assert!(check_listen_host("0.0.0.0").is_ok());
        assert!(check_listen_host("127.0.0.1").is_ok());
        assert!(check_listen_host("::1").is_ok());
        assert!(check_listen_host("fe80::1").is_ok());
    }

    #[test]
    fn hostnames_are_not_listen_hosts() {
        let err = check_listen_host("localhost").unwrap_err();
        assert!(matches!(err, NetworkConfigError::InvalidListenHost(ref h) if h == "localhost"));
        assert_eq!(err.to_string(), "invalid listen host: localhost");

        assert!(check_listen_host("").is_err());
        assert!(check_listen_host("256.0.0.1").is_err());
        assert!(check_listen_host("10.0.0.1:9000").is_err());
    }

    #[test]
    fn port_bands() {
        assert!(check_listen_port(0).is_ok());
        assert!(check_listen_port(1024).is_ok());
        assert!(check_listen_port(65535).is_ok());

        for port in [-1, 1, 80, 443, 1023, 65536, i32::MAX, i32::MIN] {
            let err = check_listen_port(port).unwrap_err();
            assert!(matches!(err, NetworkConfigError::InvalidPort(p) if p == port));
        }
        assert_eq!(
            check_listen_port(80).unwrap_err().to_string(),
            "invalid port number: 80"
        );
    }

    #[test]
    fn hostname_length_limits() {
        assert!(is_valid_hostname("stun.l.google.com"));
        assert!(is_valid_hostname(&"a".repeat(63)));
        assert!(!is_valid_hostname(&"a".repeat(64)));

        let long_name = vec!["a".repeat(63); 4].join(".");
        assert_eq!(long_name.len(), 255);
        assert!(is_valid_hostname(&long_name));
        assert!(!is_valid_hostname(&format!("{long_name}a")));
    }

    #[test]
    fn hostname_check_ignores_character_classes() {
        assert!(is_valid_hostname("under_score.example"));
        assert!(is_valid_hostname(""));
    }

    #[test]
    fn peer_entries() {
        assert!(check_peer_entry("10.0.0.1:50505").is_ok());
        assert!(check_peer_entry("[::1]:9000").is_ok());
        assert!(check_peer_entry("stun.l.google.com:19302").is_ok());

        assert!(check_peer_entry("10.0.0.1").is_err());
        assert!(check_peer_entry("10.0.0.1:99999").is_err());
        assert!(check_peer_entry(":9000").is_err());
        assert!(check_peer_entry(&format!("{}.com:9000", "a".repeat(64))).is_err());
    }

    #[test]
    fn bare_ipv6_entries_need_a_port() {
        for entry in ["fe80::1", "::1", "2001:db8::8a2e:370:7334"] {
            let reason = check_peer_entry(entry).unwrap_err();
            assert!(reason.contains("missing a port"), "{entry}: {reason}");
        }

        let reason = check_peer_entry("fe80::1::9000").unwrap_err();
        assert!(reason.contains("without brackets"), "{reason}");
        assert!(check_peer_entry("[fe80::1]:9000").is_ok());
    }
}
