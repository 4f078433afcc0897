//! Command line and environment overrides for the network configuration

use crate::config::{NetworkConfig, NetworkPorts, TurnConfig, ValidatedNetworkConfig};
use crate::error::NetworkConfigError;
use clap::Args;
use eyre::{Result, WrapErr};
use std::net::IpAddr;
use tracing::{debug, info};

/// Parameters for configuring the P2P network
#[derive(Debug, Clone, Default, Args, PartialEq, Eq)]
#[command(next_help_heading = "Networking")]
pub struct NetworkArgs {
    /// Start from the seed node profile instead of the standard peer
    #[arg(long, default_value_t = false)]
    pub bootnode: bool,

    /// Index of this node among the instances sharing a host. Picks the
    /// listen port from the default port table.
    #[arg(long, env = "P2P_INSTANCE_ID")]
    pub instance_id: Option<u32>,

    #[arg(long, env = "P2P_LISTEN_ADDR")]
    pub p2p_listen_addr: Option<String>,

    #[arg(long, env = "P2P_PORT", allow_negative_numbers = true)]
    pub p2p_port: Option<i32>,

    /// Comma separated `host:port` peers, dialed in the given order
    #[arg(long = "remote-bootnode", env = "P2P_BOOTNODES", value_delimiter = ',')]
    pub bootnodes: Vec<String>,

    /// Public address advertised to peers
    #[arg(long, env = "P2P_EXTERNAL_IP")]
    pub external_ip: Option<IpAddr>,

    /// Join the DHT as a client only
    #[arg(long, default_value_t = false)]
    pub dht_client_mode: bool,

    #[arg(long, default_value_t = false)]
    pub no_nat: bool,

    #[arg(long, default_value_t = false)]
    pub no_upnp: bool,

    /// Comma separated `host:port` STUN servers, replacing the defaults
    #[arg(long, env = "P2P_STUN_SERVERS", value_delimiter = ',')]
    pub stun_servers: Vec<String>,

    /// TURN relay as `user:pass@host:port`
    #[arg(long = "turn-server", env = "P2P_TURN_SERVERS", value_delimiter = ',')]
    pub turn_servers: Vec<TurnConfig>,
}

impl NetworkArgs {
    /// Profile selected by `--bootnode` and `--instance-id`, before any field
    /// overrides. Instanced seed nodes listen on the bootstrap port table.
    pub fn base_config(&self, ports: &NetworkPorts) -> Result<NetworkConfig, NetworkConfigError> {
        match (self.bootnode, self.instance_id) {
            (true, Some(instance_id)) => {
                let assigned = ports.instance_ports(instance_id)?;
                Ok(NetworkConfig {
                    listen_port: i32::from(assigned.bootstrap_node),
                    ..NetworkConfig::bootnode(self.external_ip)
                })
            }
            (true, None) => Ok(NetworkConfig::bootnode(self.external_ip)),
            (false, Some(instance_id)) => NetworkConfig::for_instance(ports, instance_id),
            (false, None) => Ok(NetworkConfig::new()),
        }
    }

    /// Overwrite only the fields that were given
    pub fn apply_to(&self, config: &mut NetworkConfig) {
        if let Some(host) = &self.p2p_listen_addr {
            debug!(%host, "Overriding listen host");
            config.listen_host = host.clone();
        }
        if let Some(port) = self.p2p_port {
            debug!(port, "Overriding listen port");
            config.listen_port = port;
        }
        if !self.bootnodes.is_empty() {
            debug!(count = self.bootnodes.len(), "Overriding bootstrap nodes");
            config.bootstrap_nodes = self.bootnodes.clone();
        }
        if let Some(ip) = self.external_ip {
            debug!(%ip, "Overriding external IP");
            config.external_ip = Some(ip);
        }
        if self.dht_client_mode {
            config.dht_server_mode = false;
        }
        if self.no_nat {
            config.nat_enabled = false;
        }
        if self.no_upnp {
            config.upnp_enabled = false;
        }
        if !self.stun_servers.is_empty() {
            config.stun_servers = self.stun_servers.clone();
        }
        if !self.turn_servers.is_empty() {
            config.turn_servers = self.turn_servers.clone();
        }
    }

    pub fn resolve(&self) -> Result<ValidatedNetworkConfig> {
        self.resolve_with_ports(&NetworkPorts::default())
    }

    /// Build, override and validate the configuration in one go
    pub fn resolve_with_ports(&self, ports: &NetworkPorts) -> Result<ValidatedNetworkConfig> {
        let mut config = self
            .base_config(ports)
            .wrap_err("failed to select network profile")?;
        self.apply_to(&mut config);

        let config = config
            .into_validated()
            .wrap_err("network configuration rejected")?;

        // logged as they are found
        config.peer_warnings();

        info!(
            listen = %config.multiaddr(),
            bootnodes = config.bootstrap_nodes.len(),
            dht_server = config.dht_server_mode,
            "Network configuration ready"
        );
        Ok(config)
    }
}
