//! WAV file reading and writing
//!
//! Only mono files are accepted. Integer PCM is scaled into [-1, 1];
//! output is always written as 32-bit float.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;

use super::SignalBuffer;
use crate::error::{HopfieldError, Result};

/// Read a mono WAV file into a signal buffer
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<SignalBuffer> {
    let path = path.as_ref();
    let reader = WavReader::open(path).map_err(|e| HopfieldError::from(e).in_file(path))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(HopfieldError::UnsupportedChannels(spec.channels).in_file(path));
    }

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>(),
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()
        }
    }
    .map_err(|e| HopfieldError::from(e).in_file(path))?;

    debug!(
        "read {} samples @ {} Hz from {}",
        samples.len(),
        spec.sample_rate,
        path.display()
    );

    SignalBuffer::try_new(samples, spec.sample_rate).map_err(|e| e.in_file(path))
}

/// Write a signal as a mono 32-bit float WAV file
pub fn write_wav<P: AsRef<Path>>(signal: &SignalBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &x in signal.samples() {
        writer.write_sample(x as f32)?;
    }
    writer.finalize()?;

    debug!(
        "wrote {} samples @ {} Hz to {}",
        signal.sample_count(),
        signal.sample_rate(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_float() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let signal = SignalBuffer::new(vec![0.0, 0.5, -0.25, 1.0, -1.0], 8000);
        write_wav(&signal, &path).unwrap();

        let loaded = read_wav(&path).unwrap();
        assert_eq!(loaded.sample_rate(), 8000);
        assert_eq!(loaded.sample_count(), 5);
        for (a, b) in signal.samples().iter().zip(loaded.samples()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_read_int_pcm_is_scaled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pcm.wav");

        let spec = WavSpec {
            channels: 1,
            sample_rate: 4000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(16384_i16).unwrap();
        writer.write_sample(-32768_i16).unwrap();
        writer.finalize().unwrap();

        let loaded = read_wav(&path).unwrap();
        assert_abs_diff_eq!(loaded.sample(0), 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(loaded.sample(1), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_stereo() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");

        let spec = WavSpec {
            channels: 2,
            sample_rate: 4000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0.1_f32).unwrap();
        writer.write_sample(0.2_f32).unwrap();
        writer.finalize().unwrap();

        let err = read_wav(&path).unwrap_err();
        assert!(err.to_string().contains("found 2 channels"));
    }

    #[test]
    fn test_rejects_nan_samples() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nan.wav");

        let spec = WavSpec {
            channels: 1,
            sample_rate: 4000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0.5_f32).unwrap();
        writer.write_sample(f32::NAN).unwrap();
        writer.finalize().unwrap();

        let err = read_wav(&path).unwrap_err();
        assert!(matches!(
            err,
            HopfieldError::File { ref source, .. }
                if matches!(**source, HopfieldError::NonFiniteSample { index: 1 })
        ));
        assert!(err.to_string().contains("nan.wav"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_wav("/nonexistent/memory.wav").unwrap_err();
        assert!(err.to_string().contains("memory.wav"));
    }
}
