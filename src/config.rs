//! Recall configuration
//!
//! Parameters shared by the library driver and the command-line tool.
//! They can be loaded from a JSON file; missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HopfieldError, Result};

/// Default sample rate of the network's signal space (Hz)
pub const DEFAULT_SAMPLE_RATE: u32 = 4000;
/// Default memory capacity (seconds)
pub const DEFAULT_TAU: f64 = 3.0;
/// Default inverse temperature
pub const DEFAULT_BETA: f64 = 1.0;
/// Default relative energy epsilon
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Configuration for a recall session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    /// Sample rate every signal is resampled to
    pub sample_rate: u32,
    /// Longest signal the network can hold, in seconds
    pub tau: f64,
    /// Inverse temperature of the network
    pub beta: f64,
    /// Relative energy change at which convergence stops
    ///
    /// Dimensionless, but its effective strictness depends on the neuron
    /// count and on beta.
    pub epsilon: f64,
    /// Optional cap on sweeps per convergence
    pub max_sweeps: Option<usize>,
    /// Log the energy after every sweep
    pub log_sweeps: bool,
    /// Play state files and every intermediate state
    pub play_states: bool,
    /// Play memory files as they are stored
    pub play_memories: bool,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            tau: DEFAULT_TAU,
            beta: DEFAULT_BETA,
            epsilon: DEFAULT_EPSILON,
            max_sweeps: None,
            log_sweeps: false,
            play_states: false,
            play_memories: false,
        }
    }
}

impl RecallConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| HopfieldError::from(e).in_file(path))?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| HopfieldError::from(e).in_file(path))?;
        Ok(config)
    }

    /// Number of neurons: one per sample of a `tau`-second signal
    pub fn neuron_count(&self) -> usize {
        (self.tau * self.sample_rate as f64) as usize
    }

    /// Check that the parameters describe a usable network
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(HopfieldError::InvalidConfig(
                "sample rate must be positive".to_string(),
            ));
        }
        if !(self.tau > 0.0 && self.tau.is_finite()) {
            return Err(HopfieldError::InvalidConfig(format!(
                "tau must be positive, got {}",
                self.tau
            )));
        }
        if self.beta == 0.0 || !self.beta.is_finite() {
            return Err(HopfieldError::InvalidBeta(self.beta));
        }
        if !(self.epsilon > 0.0) {
            return Err(HopfieldError::InvalidConfig(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if self.neuron_count() <= 1 {
            return Err(HopfieldError::InvalidNeuronCount(self.neuron_count()));
        }
        if self.max_sweeps == Some(0) {
            return Err(HopfieldError::InvalidConfig(
                "max_sweeps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = RecallConfig::default();

        assert_eq!(config.sample_rate, 4000);
        assert_eq!(config.tau, 3.0);
        assert_eq!(config.neuron_count(), 12000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tau": 0.5, "beta": 2.0, "log_sweeps": true }}"#).unwrap();

        let config = RecallConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.tau, 0.5);
        assert_eq!(config.beta, 2.0);
        assert!(config.log_sweeps);
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(config.neuron_count(), 2000);
    }

    #[test]
    fn test_bad_json_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(RecallConfig::from_json_file(file.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_beta = RecallConfig {
            beta: 0.0,
            ..Default::default()
        };
        assert!(matches!(zero_beta.validate(), Err(HopfieldError::InvalidBeta(_))));

        let tiny = RecallConfig {
            tau: 0.0001,
            ..Default::default()
        };
        assert!(matches!(
            tiny.validate(),
            Err(HopfieldError::InvalidNeuronCount(0))
        ));

        let no_epsilon = RecallConfig {
            epsilon: 0.0,
            ..Default::default()
        };
        assert!(no_epsilon.validate().is_err());
    }
}
