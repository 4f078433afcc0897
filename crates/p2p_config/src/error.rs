use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkConfigError {
    #[error("invalid listen host: {0}")]
    InvalidListenHost(String),
    #[error("invalid port number: {0}")]
    InvalidPort(i32),
    #[error("port base {base} plus instance {instance_id} exceeds 65535")]
    PortOverflow { base: u16, instance_id: u32 },
    #[error("invalid TURN server, expected user:pass@host:port: {0}")]
    InvalidTurnServer(String),
    #[error("multiaddr error")]
    Multiaddr(#[from] libp2p::multiaddr::Error),
}
