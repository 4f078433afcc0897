//! Handles to the node's runtime subsystems
//!
//! The network configuration carries these so the composing caller can wire
//! the networking subsystem to the rest of the node. Nothing in this crate
//! dereferences them.

use std::fmt;
use std::sync::Arc;

/// Chain state owned by the node.
pub trait Blockchain: Send + Sync {}

/// Stake pool owned by the node.
pub trait StakePool: Send + Sync {}

/// Pending transaction pool owned by the node.
pub trait Mempool: Send + Sync {}

/// Unspent output set owned by the node.
pub trait UtxoPool: Send + Sync {}

/// Optional, externally owned subsystem references
#[derive(Clone, Default)]
pub struct SubsystemHandles {
    pub blockchain: Option<Arc<dyn Blockchain>>,
    pub stake_pool: Option<Arc<dyn StakePool>>,
    pub mempool: Option<Arc<dyn Mempool>>,
    pub utxo_pool: Option<Arc<dyn UtxoPool>>,
}

impl SubsystemHandles {
    pub fn with_blockchain(mut self, blockchain: Arc<dyn Blockchain>) -> Self {
        self.blockchain = Some(blockchain);
        self
    }

    pub fn with_stake_pool(mut self, stake_pool: Arc<dyn StakePool>) -> Self {
        self.stake_pool = Some(stake_pool);
        self
    }

    pub fn with_mempool(mut self, mempool: Arc<dyn Mempool>) -> Self {
        self.mempool = Some(mempool);
        self
    }

    pub fn with_utxo_pool(mut self, utxo_pool: Arc<dyn UtxoPool>) -> Self {
        self.utxo_pool = Some(utxo_pool);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.blockchain.is_none()
            && self.stake_pool.is_none()
            && self.mempool.is_none()
            && self.utxo_pool.is_none()
    }
}

impl fmt::Debug for SubsystemHandles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubsystemHandles")
            .field("blockchain", &self.blockchain.is_some())
            .field("stake_pool", &self.stake_pool.is_some())
            .field("mempool", &self.mempool.is_some())
            .field("utxo_pool", &self.utxo_pool.is_some())
            .finish()
    }
}
