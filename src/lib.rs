//! # Hopfield Audio
//!
//! A Rust library implementing a continuous Hopfield network that stores
//! audio signals as attractors and recalls them from noisy or partial input.
//!
//! ## Features
//!
//! - Continuous (mean-field) Hopfield network with packed symmetric weights
//! - Hebbian storage of any number of superimposed memories
//! - Energy-driven convergence with a per-sweep observer
//! - WAV loading, normalization and resampling to the network size
//! - Optional playback of intermediate and stable states
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hopfield_audio::{RecallConfig, RecallSession};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut session = RecallSession::new(RecallConfig::default())?;
//!
//!     session.add_memory_from_file("memories/a.wav")?;
//!     session.add_memory_from_file("memories/b.wav")?;
//!
//!     session.set_state_from_file("noisy_a.wav")?;
//!     let report = session.converge();
//!     println!("energy {:.4} after {} sweeps", report.energy, report.sweeps);
//!
//!     session.write_stable_state("recalled.wav")?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod hopfield;
pub mod recall;
pub mod signal;
pub mod utils;

// Re-export main types for convenience
pub use config::RecallConfig;
pub use error::{HopfieldError, Result};
pub use hopfield::{
    ContinuousHopfield, ConvergenceCriterion, ConvergenceReport, NetworkParameters, StopReason,
    UniformSource,
};
pub use recall::RecallSession;
pub use signal::{AplayPlayer, Player, SignalBuffer};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::RecallConfig;
    pub use crate::error::{HopfieldError, Result};
    pub use crate::hopfield::{
        ContinuousHopfield, ConvergenceCriterion, ConvergenceReport, StopReason, UniformSource,
    };
    pub use crate::recall::RecallSession;
    pub use crate::signal::{read_wav, write_wav, AplayPlayer, Player, SignalBuffer};
}
