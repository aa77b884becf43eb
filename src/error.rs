//! Error types for the Hopfield audio library

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the boundary between user input and the network core
#[derive(Error, Debug)]
pub enum HopfieldError {
    #[error("neuron count must be greater than 1, got {0}")]
    InvalidNeuronCount(usize),

    #[error("beta must be finite and non-zero, got {0}")]
    InvalidBeta(f64),

    #[error("dimension mismatch: network has {expected} neurons, signal has {actual} samples")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("signal must contain at least one sample")]
    EmptySignal,

    #[error("sample {index} is not a finite number")]
    NonFiniteSample { index: usize },

    #[error("sample rate must be positive")]
    InvalidSampleRate,

    #[error("cannot normalize a silent signal")]
    SilentSignal,

    #[error("found {0} channels; only 1 supported")]
    UnsupportedChannels(u16),

    #[error("signal too long ({duration:.2} sec); max capacity is {capacity:.2} sec")]
    SignalTooLong { duration: f64, capacity: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<HopfieldError>,
    },

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("playback failed: {0}")]
    Playback(String),
}

impl HopfieldError {
    /// Attach the offending file path to an error
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        HopfieldError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Result type for fallible library operations
pub type Result<T> = std::result::Result<T, HopfieldError>;
