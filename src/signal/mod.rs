//! Signal module for audio sample buffers
//!
//! This module provides the fixed-length sample buffer that carries audio
//! into and out of the network, plus WAV I/O and playback.

pub mod playback;
mod resample;
pub mod wav;

use std::fmt;

use crate::error::{HopfieldError, Result};
use crate::hopfield::ContinuousHopfield;
use crate::utils::peak_abs;

pub use playback::{AplayPlayer, Player};
pub use wav::{read_wav, write_wav};

/// Mono audio signal with a sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBuffer {
    /// Samples, nominally normalized to [-1, 1]
    samples: Vec<f64>,
    /// Samples per second
    sample_rate: u32,
}

impl SignalBuffer {
    /// Create a buffer from raw samples
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty or contains NaN or infinity, or if
    /// `sample_rate` is zero.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        match Self::try_new(samples, sample_rate) {
            Ok(signal) => signal,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible constructor
    pub fn try_new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if samples.is_empty() {
            return Err(HopfieldError::EmptySignal);
        }
        if let Some(index) = samples.iter().position(|x| !x.is_finite()) {
            return Err(HopfieldError::NonFiniteSample { index });
        }
        if sample_rate == 0 {
            return Err(HopfieldError::InvalidSampleRate);
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Copy the current neuron states of a network into a new buffer
    pub fn from_network_state(network: &ContinuousHopfield, sample_rate: u32) -> Self {
        Self::new(network.states().to_vec(), sample_rate)
    }

    /// Number of samples
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Samples per second
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Sample at index `n`
    #[inline]
    pub fn sample(&self, n: usize) -> f64 {
        self.samples[n]
    }

    /// All samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Length in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> f64 {
        peak_abs(&self.samples)
    }

    /// Scale the signal so its peak is 1, returning the original peak
    pub fn normalize(&mut self) -> Result<f64> {
        let peak = self.peak();
        if peak == 0.0 {
            return Err(HopfieldError::SilentSignal);
        }

        for x in &mut self.samples {
            *x /= peak;
        }

        Ok(peak)
    }

    /// Resample to `new_rate` and fit the result into exactly `new_len` samples
    ///
    /// Rate changes go through a band-limited windowed-sinc interpolator, so
    /// content above the lower of the two Nyquist frequencies is filtered
    /// out instead of folding back. Output positions that fall past the end
    /// of the input are zero-padded; excess input is dropped.
    ///
    /// Resampling to low rates can leave peaks slightly above 1.
    pub fn resample(&mut self, new_len: usize, new_rate: u32) -> Result<()> {
        if new_len == 0 {
            return Err(HopfieldError::EmptySignal);
        }
        if new_rate == 0 {
            return Err(HopfieldError::InvalidSampleRate);
        }

        if new_rate == self.sample_rate {
            self.samples.resize(new_len, 0.0);
        } else {
            let step = self.sample_rate as f64 / new_rate as f64;
            self.samples = resample::sinc_resample(&self.samples, step, new_len);
        }
        self.sample_rate = new_rate;

        Ok(())
    }
}

impl fmt::Display for SignalBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "number of samples: {}", self.sample_count())?;
        writeln!(f, "samplerate       : {}", self.sample_rate)?;
        writeln!(f, "length (sec)     : {:.6}", self.duration())?;
        write!(f, "peak value       : {:.6}", self.peak())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_accessors() {
        let signal = SignalBuffer::new(vec![0.0, 0.5, -1.0, 0.25], 2);

        assert_eq!(signal.sample_count(), 4);
        assert_eq!(signal.sample_rate(), 2);
        assert_eq!(signal.sample(2), -1.0);
        assert_eq!(signal.duration(), 2.0);
        assert_eq!(signal.peak(), 1.0);
    }

    #[test]
    fn test_try_new_rejects_invalid() {
        assert!(matches!(
            SignalBuffer::try_new(Vec::new(), 8000),
            Err(HopfieldError::EmptySignal)
        ));
        assert!(matches!(
            SignalBuffer::try_new(vec![0.1], 0),
            Err(HopfieldError::InvalidSampleRate)
        ));
    }

    #[test]
    fn test_normalize() {
        let mut signal = SignalBuffer::new(vec![0.1, -0.4, 0.2], 100);
        let peak = signal.normalize().unwrap();

        assert_abs_diff_eq!(peak, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(signal.sample(1), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(signal.sample(0), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_silent_signal() {
        let mut signal = SignalBuffer::new(vec![0.0; 8], 100);
        assert!(matches!(signal.normalize(), Err(HopfieldError::SilentSignal)));
    }

    fn sine(frequency: f64, rate: u32, len: usize) -> SignalBuffer {
        let samples = (0..len)
            .map(|k| (2.0 * PI * frequency * k as f64 / rate as f64).sin())
            .collect();
        SignalBuffer::new(samples, rate)
    }

    #[test]
    fn test_try_new_rejects_non_finite() {
        assert!(matches!(
            SignalBuffer::try_new(vec![0.1, f64::NAN, 0.3], 8000),
            Err(HopfieldError::NonFiniteSample { index: 1 })
        ));
        assert!(matches!(
            SignalBuffer::try_new(vec![f64::NEG_INFINITY], 8000),
            Err(HopfieldError::NonFiniteSample { index: 0 })
        ));
    }

    #[test]
    fn test_resample_same_rate_pads_with_zeros() {
        let mut signal = SignalBuffer::new(vec![1.0, -0.5], 100);
        signal.resample(5, 100).unwrap();

        assert_eq!(signal.samples(), &[1.0, -0.5, 0.0, 0.0, 0.0]);
        assert_eq!(signal.sample_count(), 5);
    }

    #[test]
    fn test_resample_same_rate_truncates() {
        let mut signal = SignalBuffer::new(vec![0.1, 0.2, 0.3, 0.4], 100);
        signal.resample(2, 100).unwrap();

        assert_eq!(signal.samples(), &[0.1, 0.2]);
    }

    #[test]
    fn test_resample_downsample_keeps_low_tone() {
        // 0.1 sec of 500 Hz at 44.1 kHz, down to the 4 kHz network rate
        let mut signal = sine(500.0, 44100, 4410);
        signal.resample(400, 4000).unwrap();

        assert_eq!(signal.sample_rate(), 4000);
        assert_eq!(signal.sample_count(), 400);

        let expected = sine(500.0, 4000, 400);
        for k in 40..360 {
            assert_abs_diff_eq!(signal.sample(k), expected.sample(k), epsilon = 1e-2);
        }
    }

    #[test]
    fn test_resample_downsample_removes_tone_above_nyquist() {
        // 3 kHz lies above the 2 kHz Nyquist frequency of the target rate
        let mut signal = sine(3000.0, 44100, 4410);
        signal.resample(400, 4000).unwrap();

        let interior_peak = peak_abs(&signal.samples()[40..360]);
        assert!(interior_peak < 0.02, "aliased peak {}", interior_peak);
    }

    #[test]
    fn test_resample_upsample_interpolates() {
        let mut signal = sine(100.0, 1000, 200);
        signal.resample(400, 2000).unwrap();

        let expected = sine(100.0, 2000, 400);
        for k in 40..360 {
            assert_abs_diff_eq!(signal.sample(k), expected.sample(k), epsilon = 5e-3);
        }
    }

    #[test]
    fn test_resample_pads_past_input_end() {
        let mut signal = sine(100.0, 1000, 100);
        signal.resample(300, 2000).unwrap();

        // 100 input samples cover the first 199 output positions
        assert!(signal.samples()[199..].iter().all(|&x| x == 0.0));
        assert!(peak_abs(&signal.samples()[..199]) > 0.9);
    }

    #[test]
    fn test_from_network_state() {
        let mut network = ContinuousHopfield::new(3, 1.0);
        network.set_state(&SignalBuffer::new(vec![0.3, -0.6, 0.9], 10));

        let out = SignalBuffer::from_network_state(&network, 4000);
        assert_eq!(out.samples(), &[0.3, -0.6, 0.9]);
        assert_eq!(out.sample_rate(), 4000);
    }

    #[test]
    fn test_display() {
        let signal = SignalBuffer::new(vec![0.5; 4000], 4000);
        let text = signal.to_string();

        assert!(text.contains("number of samples: 4000"));
        assert!(text.contains("length (sec)     : 1.000000"));
    }
}
