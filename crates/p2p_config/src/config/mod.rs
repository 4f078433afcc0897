//! Network identity configuration for a peer
//!
//! This module provides the configuration value handed to the networking
//! subsystem, its default profiles, the multi-instance port table and the
//! validation gate run before network startup.

pub mod handles;
pub mod network_config;
pub mod ports;
pub mod validation;

// Re-exports for convenience
pub use handles::*;
pub use network_config::*;
pub use ports::*;
pub use validation::*;

use crate::error::NetworkConfigError;
use serde::{Deserialize, Serialize};

/// Configuration validation trait
pub trait Validate {
    fn validate(&self) -> Result<(), NetworkConfigError>;
}

/// Outcome of a detailed validation pass
///
/// `errors` mirrors the pass/fail gate. `warnings` are advisory only and never
/// flip `is_valid`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConfigValidationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
