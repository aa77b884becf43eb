//! Band-limited resampling
//!
//! Windowed-sinc interpolation: every output sample is a weighted sum of the
//! input around its position, with a sinc kernel whose cutoff sits at the
//! lower of the two Nyquist frequencies, tapered by a Blackman window.

use std::f64::consts::PI;

/// Zero crossings of the sinc kernel on each side of its centre
const SINC_ZERO_CROSSINGS: f64 = 16.0;

/// Blackman window over `u` in [-1, 1], zero outside
pub(crate) fn blackman(u: f64) -> f64 {
    if u.abs() >= 1.0 {
        return 0.0;
    }
    0.42 + 0.5 * (PI * u).cos() + 0.08 * (2.0 * PI * u).cos()
}

/// Normalized sinc, sin(πx) / (πx)
pub(crate) fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Resample `input` with `step` input samples per output sample
///
/// Output `k` sits at input position `k * step`; positions past the last
/// input sample are zero. Samples outside the input count as zero, and the
/// kernel is normalized over its full support so the DC gain is one.
pub(crate) fn sinc_resample(input: &[f64], step: f64, new_len: usize) -> Vec<f64> {
    let cutoff = (1.0 / step).min(1.0);
    let half_width = SINC_ZERO_CROSSINGS / cutoff;
    let last = input.len().saturating_sub(1) as f64;

    (0..new_len)
        .map(|k| {
            let t = k as f64 * step;
            if t > last {
                return 0.0;
            }

            let first = (t - half_width).ceil() as i64;
            let end = (t + half_width).floor() as i64;

            let mut acc = 0.0;
            let mut norm = 0.0;
            for m in first..=end {
                let offset = t - m as f64;
                let weight = sinc(cutoff * offset) * blackman(offset / half_width);
                norm += weight;
                if m >= 0 && (m as usize) < input.len() {
                    acc += input[m as usize] * weight;
                }
            }

            if norm > 0.0 {
                acc / norm
            } else {
                0.0
            }
        })
        .collect()
}
