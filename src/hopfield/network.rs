//! Continuous Hopfield Network
//!
//! Mean-field Hopfield network with `tanh` neurons and Hebbian storage.
//! Memories are superimposed into one packed symmetric weight matrix, and
//! recall relaxes the neuron state by sequential sweeps until the energy
//! stops changing.

use std::io::{self, Write};

use log::{debug, info, warn};
use ndarray::{Array1, Array2, ArrayView1};

use super::energy::{binary_entropy, ConvergenceCriterion, ConvergenceReport, StopReason};
use super::random::UniformSource;
use super::weights::{check_bounds, SymmetricWeights};
use super::NetworkParameters;
use crate::error::{HopfieldError, Result};
use crate::signal::SignalBuffer;

/// Continuous Hopfield network over `neuron_count` neurons
///
/// # Example
///
/// ```rust
/// use hopfield_audio::{ContinuousHopfield, SignalBuffer};
///
/// let memory = SignalBuffer::new(vec![1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0], 8);
/// let noisy = SignalBuffer::new(vec![1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0, -1.0], 8);
///
/// let mut network = ContinuousHopfield::new(8, 1.0);
/// network.add_memory(&memory);
/// network.set_state(&noisy);
///
/// let energy = network.converge(1e-9);
/// assert!(energy < 0.0);
/// assert!(network.state(3) > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ContinuousHopfield {
    /// Neuron states, nominally in (-1, 1)
    state: Array1<f64>,
    /// Symmetric coupling weights
    weights: SymmetricWeights,
    /// Inverse temperature weighting the entropy term
    beta: f64,
    /// Number of stored memories
    memory_count: usize,
}

impl ContinuousHopfield {
    /// Create a network with all weights at zero
    ///
    /// # Panics
    ///
    /// Panics if `neuron_count <= 1` or `beta` is zero or not finite.
    pub fn new(neuron_count: usize, beta: f64) -> Self {
        match Self::try_new(neuron_count, beta) {
            Ok(network) => network,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible constructor for parameters that come from user input
    pub fn try_new(neuron_count: usize, beta: f64) -> Result<Self> {
        if neuron_count <= 1 {
            return Err(HopfieldError::InvalidNeuronCount(neuron_count));
        }
        if beta == 0.0 || !beta.is_finite() {
            return Err(HopfieldError::InvalidBeta(beta));
        }

        let mut network = Self {
            state: Array1::zeros(neuron_count),
            weights: SymmetricWeights::zeros(neuron_count),
            beta,
            memory_count: 0,
        };
        network.set_all_weights(0.0);

        Ok(network)
    }

    /// Number of neurons
    pub fn neuron_count(&self) -> usize {
        self.state.len()
    }

    /// Number of memories stored so far
    pub fn memory_count(&self) -> usize {
        self.memory_count
    }

    /// Inverse temperature
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// State of neuron `i`
    #[inline]
    pub fn state(&self, i: usize) -> f64 {
        check_bounds(i, self.neuron_count());
        self.state[i]
    }

    /// View of the whole state vector
    pub fn states(&self) -> ArrayView1<'_, f64> {
        self.state.view()
    }

    /// Weight between neurons `i` and `j`
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights.get(i, j)
    }

    /// Dense copy of the weight matrix
    pub fn weight_matrix(&self) -> Array2<f64> {
        self.weights.to_dense()
    }

    /// Overwrite every off-diagonal weight
    pub fn set_all_weights(&mut self, value: f64) {
        self.weights.fill(value);
    }

    /// Store a memory with the Hebbian outer-product rule
    ///
    /// Adds `s[i] * s[j]` to every weight `(i, j)` with `i < j` and returns
    /// the new memory count.
    ///
    /// # Panics
    ///
    /// Panics if the signal length differs from the neuron count.
    pub fn add_memory(&mut self, signal: &SignalBuffer) -> usize {
        self.assert_dimension(signal);

        let samples = signal.samples();
        for j in 0..samples.len() {
            let x_j = samples[j];
            for (i, &x_i) in samples[..j].iter().enumerate() {
                self.weights.accumulate(i, j, x_i * x_j);
            }
        }

        self.memory_count += 1;
        debug!(
            "stored memory #{} ({} neurons)",
            self.memory_count,
            self.neuron_count()
        );
        self.memory_count
    }

    /// [`add_memory`](Self::add_memory) that reports a mismatch instead of panicking
    pub fn try_add_memory(&mut self, signal: &SignalBuffer) -> Result<usize> {
        self.check_dimension(signal)?;
        Ok(self.add_memory(signal))
    }

    /// Copy a signal into the neuron state unchanged
    ///
    /// # Panics
    ///
    /// Panics if the signal length differs from the neuron count.
    pub fn set_state(&mut self, signal: &SignalBuffer) {
        self.assert_dimension(signal);

        for (x, &s) in self.state.iter_mut().zip(signal.samples()) {
            *x = s;
        }
    }

    /// [`set_state`](Self::set_state) that reports a mismatch instead of panicking
    pub fn try_set_state(&mut self, signal: &SignalBuffer) -> Result<()> {
        self.check_dimension(signal)?;
        self.set_state(signal);
        Ok(())
    }

    /// Draw every neuron state uniformly from [-1, 1]
    pub fn set_state_to_random<R: UniformSource + ?Sized>(&mut self, source: &mut R) {
        for x in self.state.iter_mut() {
            *x = source.next_uniform();
        }
    }

    /// Weighted input to neuron `i` from the current state
    pub fn activation(&self, i: usize) -> f64 {
        self.state
            .iter()
            .enumerate()
            .map(|(j, &x_j)| x_j * self.weights.get(i, j))
            .sum()
    }

    /// Set neuron `i` to `tanh(activation(i))` and return the new value
    pub fn update_state(&mut self, i: usize) -> f64 {
        let x_i = self.activation(i).tanh();
        self.state[i] = x_i;
        x_i
    }

    /// Update every neuron once, in index order, then return the energy
    ///
    /// Updates are sequential: neuron `i` sees the values already written
    /// for neurons `0..i` in this sweep.
    pub fn sweep(&mut self) -> f64 {
        for i in 0..self.neuron_count() {
            self.update_state(i);
        }

        self.energy()
    }

    /// Mean-field energy of the current state
    ///
    /// E = -½ Σ_i Σ_j w_ij x_i x_j - (1/β) Σ_i H((1 + x_i) / 2)
    pub fn energy(&self) -> f64 {
        let n = self.neuron_count();
        let mut interaction = 0.0;
        let mut entropy = 0.0;

        for i in 0..n {
            let x_i = self.state[i];
            entropy += binary_entropy((1.0 + x_i) / 2.0);

            // Zero diagonal and symmetry: the full double sum is twice the
            // strict upper triangle.
            for j in (i + 1)..n {
                interaction += self.weights.get(i, j) * x_i * self.state[j];
            }
        }

        -interaction - entropy / self.beta
    }

    /// Sweep until the relative energy change drops below `epsilon`
    ///
    /// Returns the final energy. At least one sweep always runs.
    pub fn converge(&mut self, epsilon: f64) -> f64 {
        self.converge_observed(epsilon, |_, _| true)
    }

    /// Like [`converge`](Self::converge), calling `observer` after every
    /// sweep with the network and the new energy. Returning `false` stops
    /// the loop early.
    pub fn converge_observed<F>(&mut self, epsilon: f64, observer: F) -> f64
    where
        F: FnMut(&Self, f64) -> bool,
    {
        self.converge_with(&ConvergenceCriterion::new(epsilon), observer)
            .energy
    }

    /// Convergence loop with full control over the stopping rule
    ///
    /// # Panics
    ///
    /// Panics if `criterion.epsilon` is not positive.
    pub fn converge_with<F>(
        &mut self,
        criterion: &ConvergenceCriterion,
        mut observer: F,
    ) -> ConvergenceReport
    where
        F: FnMut(&Self, f64) -> bool,
    {
        assert!(
            criterion.epsilon > 0.0,
            "epsilon must be positive, got {}",
            criterion.epsilon
        );

        let initial_energy = self.energy();
        let mut new_energy = initial_energy;
        let mut sweeps = 0;

        let stop_reason = loop {
            let last_energy = new_energy;
            new_energy = self.sweep();
            sweeps += 1;
            debug!("sweep {} completed; energy = {}", sweeps, new_energy);

            if !observer(&*self, new_energy) {
                break StopReason::ObserverStopped;
            }
            if criterion.is_stable(new_energy, last_energy) {
                if !new_energy.is_finite() {
                    warn!("energy is no longer finite after sweep {}", sweeps);
                }
                break StopReason::Converged;
            }
            if criterion.max_sweeps.is_some_and(|max| sweeps >= max) {
                break StopReason::SweepLimit;
            }
        };

        info!(
            "convergence finished after {} sweeps ({:?}); energy {:.6} -> {:.6}",
            sweeps, stop_reason, initial_energy, new_energy
        );

        ConvergenceReport {
            initial_energy,
            energy: new_energy,
            sweeps,
            stop_reason,
        }
    }

    /// Snapshot of the network parameters
    pub fn parameters(&self) -> NetworkParameters {
        NetworkParameters {
            neuron_count: self.neuron_count(),
            memory_count: self.memory_count,
            beta: self.beta,
        }
    }

    /// Log the network parameters at info level
    pub fn log_parameters(&self) {
        for line in self.parameters().to_string().lines() {
            info!("{}", line);
        }
    }

    /// Write the dense weight matrix, one row per line
    pub fn write_weights<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let n = self.neuron_count();
        for i in 0..n {
            for j in 0..n {
                write!(out, "{:.2} ", self.weight(i, j))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn check_dimension(&self, signal: &SignalBuffer) -> Result<()> {
        if signal.sample_count() != self.neuron_count() {
            return Err(HopfieldError::DimensionMismatch {
                expected: self.neuron_count(),
                actual: signal.sample_count(),
            });
        }
        Ok(())
    }

    fn assert_dimension(&self, signal: &SignalBuffer) {
        assert_eq!(
            signal.sample_count(),
            self.neuron_count(),
            "Signal length must equal the neuron count"
        );
    }
}
