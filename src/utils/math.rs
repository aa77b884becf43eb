//! Mathematical utility functions
//!
//! This module provides the scalar and vector operations used for signal
//! preprocessing and for comparing recalled states with memories.

/// Largest absolute value of a slice (0.0 when empty)
pub fn peak_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |peak, &x| peak.max(x.abs()))
}

/// Sign function
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Fraction of positions where both slices carry the same sign
pub fn sign_agreement(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");
    if a.is_empty() {
        return 1.0;
    }

    let matches = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| sign(**x) == sign(**y))
        .count();

    matches as f64 / a.len() as f64
}

/// Cosine similarity between two vectors
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x.powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x.powi(2)).sum::<f64>().sqrt();

    if norm_a < 1e-10 || norm_b < 1e-10 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
