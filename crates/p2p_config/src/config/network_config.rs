//! Network and P2P identity configuration

use super::*;
use libp2p::Multiaddr;
use std::fmt;
use std::net::IpAddr;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_LISTEN_PORT: i32 = 9000;

/// Fixed port every seed node listens on.
pub const BOOTNODE_LISTEN_PORT: i32 = 50505;

pub const DEFAULT_STUN_SERVERS: [&str; 2] =
    ["stun.l.google.com:19302", "stun1.l.google.com:19302"];

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Listen address, `0.0.0.0` for all interfaces
    pub listen_host: String,
    /// Listen port, 0 lets the OS pick
    pub listen_port: i32,
    /// `host:port` peers dialed at startup, in order
    pub bootstrap_nodes: Vec<String>,
    /// Address advertised for NAT traversal, `None` to auto-discover
    pub external_ip: Option<IpAddr>,
    /// Advertise as a reachable DHT server rather than a client
    pub dht_server_mode: bool,
    pub nat_enabled: bool,
    /// UPnP port mapping
    pub upnp_enabled: bool,
    /// `host:port` STUN servers
    pub stun_servers: Vec<String>,
    pub turn_servers: Vec<TurnConfig>,
    #[serde(skip)]
    pub subsystems: SubsystemHandles,
}

/// TURN relay server and its credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnConfig {
    pub address: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for TurnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parses `user:pass@host:port`. The password may contain `:` and the
/// address is everything after the last `@`.
impl FromStr for TurnConfig {
    type Err = NetworkConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NetworkConfigError::InvalidTurnServer(s.to_string());

        let (credentials, address) = s.rsplit_once('@').ok_or_else(invalid)?;
        let (username, password) = credentials.split_once(':').ok_or_else(invalid)?;
        if address.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            address: address.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            listen_host: WILDCARD_HOST.to_string(),
            listen_port: DEFAULT_LISTEN_PORT,
            bootstrap_nodes: Vec::new(),
            external_ip: None,
            dht_server_mode: true,
            nat_enabled: true,
            upnp_enabled: true,
            stun_servers: DEFAULT_STUN_SERVERS.iter().map(|s| s.to_string()).collect(),
            turn_servers: Vec::new(),
            subsystems: SubsystemHandles::default(),
        }
    }
}

impl NetworkConfig {
    /// Fresh standard peer configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration for a bootstrap/seed node
    ///
    /// The public address comes from deployment configuration. Seed nodes skip
    /// STUN since their address is already public and fixed.
    pub fn bootnode(external_ip: Option<IpAddr>) -> Self {
        Self {
            listen_port: BOOTNODE_LISTEN_PORT,
            external_ip,
            stun_servers: Vec::new(),
            ..Self::default()
        }
    }

    /// Standard peer listening on the P2P port assigned to `instance_id`
    pub fn for_instance(ports: &NetworkPorts, instance_id: u32) -> Result<Self, NetworkConfigError> {
        let assigned = ports.instance_ports(instance_id)?;
        Ok(Self {
            listen_port: i32::from(assigned.p2p),
            ..Self::default()
        })
    }

    pub fn with_subsystems(mut self, subsystems: SubsystemHandles) -> Self {
        self.subsystems = subsystems;
        self
    }

    /// `/ip4/<host>/tcp/<port>`, formatted as-is without validation
    pub fn multiaddr(&self) -> String {
        format!("/ip4/{}/tcp/{}", self.listen_host, self.listen_port)
    }

    /// Typed listen address for the transport. IPv6 hosts use `/ip6/`.
    pub fn to_multiaddr(&self) -> Result<Multiaddr, NetworkConfigError> {
        let protocol = match self.listen_host.parse::<IpAddr>() {
            Ok(IpAddr::V6(_)) => "ip6",
            _ => "ip4",
        };
        let addr = format!("/{protocol}/{}/tcp/{}", self.listen_host, self.listen_port);
        Ok(addr.parse()?)
    }

    /// Run the startup gate and collect advisory warnings about the peer
    /// lists, which the gate itself accepts as-is.
    pub fn validate_detailed(&self) -> ConfigValidationReport {
        let mut report = ConfigValidationReport {
            is_valid: true,
            errors: Vec::new(),
            warnings: self.peer_warnings(),
        };

        if let Err(err) = self.validate() {
            report.errors.push(err.to_string());
            report.is_valid = false;
        }

        report
    }

    /// Advisory warnings only, without running the startup gate. Each one is
    /// also logged.
    pub fn peer_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for entry in &self.bootstrap_nodes {
            if let Err(reason) = check_peer_entry(entry) {
                warnings.push(format!("bootstrap node {reason}"));
            }
        }

        for entry in &self.stun_servers {
            if let Err(reason) = check_peer_entry(entry) {
                warnings.push(format!("STUN server {reason}"));
            }
        }

        for turn in &self.turn_servers {
            if let Err(reason) = check_peer_entry(&turn.address) {
                warnings.push(format!("TURN server {reason}"));
            }
            if turn.username.is_empty() || turn.password.is_empty() {
                warnings.push(format!("TURN server '{}' has empty credentials", turn.address));
            }
        }

        if self.dht_server_mode && !self.nat_enabled && !self.upnp_enabled && self.external_ip.is_none() {
            warnings.push(
                "DHT server mode with NAT traversal disabled and no external IP, peers may not reach this node"
                    .to_string(),
            );
        }

        for warning in &warnings {
            warn!(%warning, "Network configuration warning");
        }

        warnings
    }

    /// Validate and freeze the configuration for handoff to the network
    pub fn into_validated(self) -> Result<ValidatedNetworkConfig, NetworkConfigError> {
        self.validate()?;
        Ok(ValidatedNetworkConfig(Arc::new(self)))
    }
}

impl Validate for NetworkConfig {
    fn validate(&self) -> Result<(), NetworkConfigError> {
        let result = check_listen_host(&self.listen_host)
            .and_then(|()| check_listen_port(self.listen_port));

        match &result {
            Ok(()) => debug!(
                host = %self.listen_host,
                port = self.listen_port,
                "Network configuration validated"
            ),
            Err(err) => warn!(%err, "Network configuration rejected"),
        }

        result
    }
}

/// A configuration that passed [`Validate::validate`]
///
/// Read-only from here on. Clones share the same value.
#[derive(Debug, Clone)]
pub struct ValidatedNetworkConfig(Arc<NetworkConfig>);

impl ValidatedNetworkConfig {
    /// Take the value back out for further edits. It has to be validated again
    /// before reuse.
    pub fn into_inner(self) -> NetworkConfig {
        Arc::unwrap_or_clone(self.0)
    }
}

impl Deref for ValidatedNetworkConfig {
    type Target = NetworkConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<NetworkConfig> for ValidatedNetworkConfig {
    type Error = NetworkConfigError;

    fn try_from(config: NetworkConfig) -> Result<Self, Self::Error> {
        config.into_validated()
    }
}
