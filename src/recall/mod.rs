//! Recall session
//!
//! Drives a network from audio files: memories are loaded, checked against
//! the network's capacity, normalized and resampled before storage, and
//! state files go through the same pipeline before convergence.

use std::path::Path;

use log::{info, warn};

use crate::config::RecallConfig;
use crate::error::{HopfieldError, Result};
use crate::hopfield::{ContinuousHopfield, ConvergenceCriterion, ConvergenceReport, UniformSource};
use crate::signal::{read_wav, write_wav, Player, SignalBuffer};

/// Network plus the configuration and optional player used to feed it
pub struct RecallSession {
    config: RecallConfig,
    network: ContinuousHopfield,
    player: Option<Box<dyn Player>>,
}

impl RecallSession {
    /// Build the network described by `config`
    pub fn new(config: RecallConfig) -> Result<Self> {
        config.validate()?;
        let network = ContinuousHopfield::try_new(config.neuron_count(), config.beta)?;

        Ok(Self {
            config,
            network,
            player: None,
        })
    }

    /// Attach a player used by the `play_*` options
    pub fn with_player(mut self, player: Box<dyn Player>) -> Self {
        self.player = Some(player);
        self
    }

    /// Session configuration
    pub fn config(&self) -> &RecallConfig {
        &self.config
    }

    /// The underlying network
    pub fn network(&self) -> &ContinuousHopfield {
        &self.network
    }

    /// Load a file and shape it to the network
    ///
    /// Signals longer than `tau` are rejected; shorter ones are normalized,
    /// resampled and zero-padded to exactly one sample per neuron.
    pub fn extract_signal<P: AsRef<Path>>(&self, path: P) -> Result<SignalBuffer> {
        let path = path.as_ref();
        let signal = read_wav(path)?;
        self.prepare_signal(signal).map_err(|e| e.in_file(path))
    }

    /// Apply the capacity check, normalization and resampling to a signal
    pub fn prepare_signal(&self, mut signal: SignalBuffer) -> Result<SignalBuffer> {
        if signal.duration() > self.config.tau {
            return Err(HopfieldError::SignalTooLong {
                duration: signal.duration(),
                capacity: self.config.tau,
            });
        }

        signal.normalize()?;
        signal.resample(self.network.neuron_count(), self.config.sample_rate)?;

        Ok(signal)
    }

    /// Store a memory file, returning the new memory count
    pub fn add_memory_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let signal = self.extract_signal(path)?;

        if self.config.play_memories {
            info!("playing memory file: {}", path.display());
            self.play(&signal);
        }

        let count = self.network.try_add_memory(&signal)?;
        info!("added memory: {}", path.display());
        Ok(count)
    }

    /// Set the network state from a file
    pub fn set_state_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let signal = self.extract_signal(path)?;

        if self.config.play_states {
            info!("playing state file: {}", path.display());
            self.play(&signal);
        }

        self.network.try_set_state(&signal)?;
        info!("set state: {}", path.display());
        Ok(())
    }

    /// Set the network state to uniform noise
    pub fn randomize_state<R: UniformSource + ?Sized>(&mut self, source: &mut R) {
        self.network.set_state_to_random(source);
        info!("set to random state");
    }

    /// Converge from the current state
    ///
    /// With `log_sweeps` every sweep's energy is logged; with `play_states`
    /// every intermediate state is played. Playback failures are logged and
    /// do not stop the convergence.
    pub fn converge(&mut self) -> ConvergenceReport {
        let mut criterion = ConvergenceCriterion::new(self.config.epsilon);
        criterion.max_sweeps = self.config.max_sweeps;

        let log_sweeps = self.config.log_sweeps;
        let sample_rate = self.config.sample_rate;
        let mut player = if self.config.play_states {
            self.player.as_deref_mut()
        } else {
            None
        };

        self.network.converge_with(&criterion, |network, energy| {
            if log_sweeps {
                info!("sweep completed; energy = {}", energy);
            }
            if let Some(player) = player.as_mut() {
                let state = SignalBuffer::from_network_state(network, sample_rate);
                if let Err(e) = player.play(&state) {
                    warn!("could not play intermediate state: {}", e);
                }
            }
            true
        })
    }

    /// Current network state as a signal at the session sample rate
    pub fn stable_state(&self) -> SignalBuffer {
        SignalBuffer::from_network_state(&self.network, self.config.sample_rate)
    }

    /// Play the current network state
    pub fn play_stable_state(&mut self) -> Result<()> {
        let state = self.stable_state();
        match self.player.as_mut() {
            Some(player) => {
                info!("playing stable state");
                player.play(&state)
            }
            None => Err(HopfieldError::Playback("no player configured".to_string())),
        }
    }

    /// Write the current network state to a WAV file
    pub fn write_stable_state<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_wav(&self.stable_state(), path)
    }

    fn play(&mut self, signal: &SignalBuffer) {
        if let Some(player) = self.player.as_mut() {
            if let Err(e) = player.play(signal) {
                warn!("playback failed: {}", e);
            }
        }
    }
}
