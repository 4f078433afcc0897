//! Deterministic port allocation for co-located node instances

use super::*;

/// Base ports for each port category.
///
/// Instance `n` on a host uses `base + n` in every category. The defaults sit
/// 1000 apart, so up to 999 instances never collide across categories.
/// Nothing checks that custom bases keep that spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkPorts {
    pub bootstrap_node_base_port: u16,
    pub p2p_base_port: u16,
    pub rpc_base_port: u16,
}

/// The three ports assigned to one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstancePorts {
    pub instance_id: u32,
    pub bootstrap_node: u16,
    pub p2p: u16,
    pub rpc: u16,
}

impl Default for NetworkPorts {
    fn default() -> Self {
        Self {
            bootstrap_node_base_port: 50500,
            p2p_base_port: 51500,
            rpc_base_port: 52500,
        }
    }
}

impl NetworkPorts {
    /// `bootstrap_node_base_port + instance_id`. Callers keep `instance_id`
    /// small enough for the result to stay within 65535.
    pub fn bootstrap_node_port(&self, instance_id: u32) -> u32 {
        offset(self.bootstrap_node_base_port, instance_id)
    }

    /// `p2p_base_port + instance_id`, same precondition as above.
    pub fn p2p_port(&self, instance_id: u32) -> u32 {
        offset(self.p2p_base_port, instance_id)
    }

    /// `rpc_base_port + instance_id`, same precondition as above.
    pub fn rpc_port(&self, instance_id: u32) -> u32 {
        offset(self.rpc_base_port, instance_id)
    }

    /// All three ports for an instance, failing if any lands past 65535.
    pub fn instance_ports(&self, instance_id: u32) -> Result<InstancePorts, NetworkConfigError> {
        Ok(InstancePorts {
            instance_id,
            bootstrap_node: checked_offset(self.bootstrap_node_base_port, instance_id)?,
            p2p: checked_offset(self.p2p_base_port, instance_id)?,
            rpc: checked_offset(self.rpc_base_port, instance_id)?,
        })
    }
}

fn offset(base: u16, instance_id: u32) -> u32 {
    u32::from(base).saturating_add(instance_id)
}

fn checked_offset(base: u16, instance_id: u32) -> Result<u16, NetworkConfigError> {
    u16::try_from(offset(base, instance_id))
        .map_err(|_| NetworkConfigError::PortOverflow { base, instance_id })
}
