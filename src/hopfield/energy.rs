//! Energy bookkeeping and the convergence stopping rule

use serde::Serialize;

/// Default `|E_old|` below which the relative test falls back to an
/// absolute difference
pub const DEFAULT_ZERO_ENERGY_FLOOR: f64 = 1e-12;

/// Typical relative energy epsilon for convergence
pub const TYPICAL_ENERGY_EPSILON: f64 = 1e-6;

/// Binary entropy in nats
///
/// H(q) = -q·ln(q) - (1-q)·ln(1-q)
///
/// Values of `q` within `f64::EPSILON` of 0 or 1 (or outside [0, 1])
/// contribute exactly zero.
pub fn binary_entropy(q: f64) -> f64 {
    if q <= f64::EPSILON || q >= 1.0 - f64::EPSILON {
        return 0.0;
    }

    -q * q.ln() - (1.0 - q) * (1.0 - q).ln()
}

/// Change between two consecutive energies
///
/// Relative (`|new - old| / |old|`) unless `|old| <= floor`, in which case
/// the absolute difference is returned.
pub fn relative_change(new_energy: f64, old_energy: f64, floor: f64) -> f64 {
    let delta = (new_energy - old_energy).abs();
    if old_energy.abs() <= floor {
        delta
    } else {
        delta / old_energy.abs()
    }
}

/// When to stop iterating sweeps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceCriterion {
    /// Relative energy change below which the network is considered stable
    pub epsilon: f64,
    /// See [`relative_change`]
    pub zero_energy_floor: f64,
    /// Optional cap on the number of sweeps
    pub max_sweeps: Option<usize>,
}

impl ConvergenceCriterion {
    /// Unbounded criterion with the default zero-energy floor
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            ..Default::default()
        }
    }

    /// Cap the number of sweeps
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = Some(max_sweeps);
        self
    }

    /// Whether two consecutive energies are close enough to stop
    ///
    /// A NaN change counts as stable, so a non-finite energy ends the loop.
    pub fn is_stable(&self, new_energy: f64, old_energy: f64) -> bool {
        let change = relative_change(new_energy, old_energy, self.zero_energy_floor);
        change.is_nan() || change < self.epsilon
    }
}

impl Default for ConvergenceCriterion {
    fn default() -> Self {
        Self {
            epsilon: TYPICAL_ENERGY_EPSILON,
            zero_energy_floor: DEFAULT_ZERO_ENERGY_FLOOR,
            max_sweeps: None,
        }
    }
}

/// Why the convergence loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// Energy change dropped below epsilon
    Converged,
    /// The per-sweep observer asked to stop
    ObserverStopped,
    /// `max_sweeps` was reached first
    SweepLimit,
}

/// Outcome of a convergence run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergenceReport {
    /// Energy at entry
    pub initial_energy: f64,
    /// Energy after the last sweep
    pub energy: f64,
    /// Number of sweeps performed (always at least one)
    pub sweeps: usize,
    /// Why the loop ended
    pub stop_reason: StopReason,
}

impl ConvergenceReport {
    /// Whether the energy actually stabilized
    pub fn converged(&self) -> bool {
        self.stop_reason == StopReason::Converged
    }
}
