//! Hopfield Network core
//!
//! This module provides the continuous Hopfield network together with its
//! packed weight storage, energy bookkeeping and random initialization.

pub mod energy;
pub mod network;
pub mod random;
pub mod weights;

use serde::Serialize;
use std::fmt;

pub use energy::{ConvergenceCriterion, ConvergenceReport, StopReason};
pub use network::ContinuousHopfield;
pub use random::UniformSource;
pub use weights::SymmetricWeights;

/// Read-only summary of a network
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkParameters {
    /// Number of neurons
    pub neuron_count: usize,
    /// Number of stored memories
    pub memory_count: usize,
    /// Inverse temperature
    pub beta: f64,
}

impl fmt::Display for NetworkParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "number of neurons: I = {}", self.neuron_count)?;
        writeln!(f, "number of memories: {}", self.memory_count)?;
        write!(f, "beta: {:.2e}", self.beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_display() {
        let params = NetworkParameters {
            neuron_count: 12000,
            memory_count: 3,
            beta: 1.0,
        };

        let text = params.to_string();
        assert!(text.contains("I = 12000"));
        assert!(text.contains("number of memories: 3"));
        assert!(text.contains("beta: 1.00e0"));
    }

    #[test]
    fn test_parameters_serialize() {
        let params = NetworkParameters {
            neuron_count: 16,
            memory_count: 2,
            beta: 0.5,
        };

        let value = serde_json::to_value(params).unwrap();
        assert_eq!(value["neuron_count"], 16);
        assert_eq!(value["memory_count"], 2);
        assert_eq!(value["beta"], 0.5);
    }
}
