//! Audio playback
//!
//! Playback is synchronous: `play` returns once the audio has finished.

use std::process::Command;

use log::debug;

use super::{write_wav, SignalBuffer};
use crate::error::{HopfieldError, Result};

/// Something that can play a signal to completion
pub trait Player {
    /// Play the signal and block until it has finished
    fn play(&mut self, signal: &SignalBuffer) -> Result<()>;
}

/// Plays signals through ALSA's `aplay` via a temporary WAV file
#[derive(Debug, Clone)]
pub struct AplayPlayer {
    /// Program to invoke
    program: String,
}

impl AplayPlayer {
    /// Player using `aplay` from `PATH`
    pub fn new() -> Self {
        Self::with_program("aplay")
    }

    /// Player using a specific program that accepts `--quiet <file>`
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for AplayPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for AplayPlayer {
    fn play(&mut self, signal: &SignalBuffer) -> Result<()> {
        // Removed when dropped
        let file = tempfile::Builder::new()
            .prefix("hopfield-")
            .suffix(".wav")
            .tempfile()?;
        write_wav(signal, file.path())?;

        debug!("{} --quiet {}", self.program, file.path().display());
        let status = Command::new(&self.program)
            .arg("--quiet")
            .arg(file.path())
            .status()
            .map_err(|e| HopfieldError::Playback(format!("{}: {}", self.program, e)))?;

        if !status.success() {
            return Err(HopfieldError::Playback(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        Ok(())
    }
}
