//! Network identity configuration for peers of the P2P blockchain network.
//!
//! Covers the listen address, NAT traversal options, bootstrap peers and the
//! port table used to run several node instances on one host. Everything here
//! is plain data and pure functions; the transport itself lives elsewhere.

pub mod args;
pub mod config;
pub mod error;

pub use args::NetworkArgs;
pub use config::*;
pub use error::NetworkConfigError;
