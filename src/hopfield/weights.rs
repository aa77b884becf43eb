//! Packed symmetric weight storage
//!
//! The weight matrix of a Hopfield network is symmetric with a zero
//! diagonal, so only the upper triangle (diagonal included) is stored in a
//! flat buffer of `n * (n + 1) / 2` cells. Reads and writes for `(i, j)`
//! and `(j, i)` resolve to the same cell, which makes symmetry a property
//! of the layout rather than something to check at runtime.

use ndarray::Array2;

/// Index check that is compiled in for debug builds or with the
/// `check-bounds` feature, and compiled out otherwise.
#[cfg(any(debug_assertions, feature = "check-bounds"))]
#[inline]
pub(crate) fn check_bounds(index: usize, n: usize) {
    assert!(index < n, "neuron index {} out of range for {} neurons", index, n);
}

#[cfg(not(any(debug_assertions, feature = "check-bounds")))]
#[inline(always)]
pub(crate) fn check_bounds(_index: usize, _n: usize) {}

/// Number of cells needed to store an `n x n` symmetric matrix
pub fn packed_len(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Map an index pair to its position in the packed upper triangle
///
/// For `i <= j` the row of `i` starts at `i*n - i*(i-1)/2`, written here
/// as `i*(2n - i + 1)/2` so it never underflows. Pairs with `i > j` are
/// swapped first.
#[inline]
pub fn triangle_index(i: usize, j: usize, n: usize) -> usize {
    let (i, j) = if i <= j { (i, j) } else { (j, i) };
    i * (2 * n - i + 1) / 2 + (j - i)
}

/// Symmetric, zero-diagonal weight matrix in packed triangular form
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricWeights {
    /// Matrix dimension (number of neurons)
    n: usize,
    /// Upper triangle cells, row-major
    cells: Vec<f64>,
}

impl SymmetricWeights {
    /// Create an all-zero weight matrix for `n` neurons
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            cells: vec![0.0; packed_len(n)],
        }
    }

    /// Weight between neurons `i` and `j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        check_bounds(i, self.n);
        check_bounds(j, self.n);
        self.cells[triangle_index(i, j, self.n)]
    }

    /// Add `delta` to the weight between two distinct neurons
    #[inline]
    pub fn accumulate(&mut self, i: usize, j: usize, delta: f64) {
        check_bounds(i, self.n);
        check_bounds(j, self.n);
        assert_ne!(i, j, "self-connections are not allowed");
        let idx = triangle_index(i, j, self.n);
        self.cells[idx] += delta;
    }

    /// Overwrite every off-diagonal weight with `value`
    ///
    /// Diagonal cells are left at zero.
    pub fn fill(&mut self, value: f64) {
        for i in 0..self.n {
            let row_start = triangle_index(i, i, self.n);
            self.cells[row_start] = 0.0;
            let row_len = self.n - i;
            for cell in &mut self.cells[row_start + 1..row_start + row_len] {
                *cell = value;
            }
        }
    }

    /// Expand to a dense `n x n` matrix
    pub fn to_dense(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.n, self.n), |(i, j)| self.get(i, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_index_is_bijection() {
        for n in 2..12 {
            let mut seen = vec![false; packed_len(n)];
            for i in 0..n {
                for j in i..n {
                    let idx = triangle_index(i, j, n);
                    assert!(idx < packed_len(n));
                    assert!(!seen[idx], "index {} hit twice for n = {}", idx, n);
                    seen[idx] = true;
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn test_triangle_index_matches_row_formula() {
        let n = 5;
        // Row 0 occupies 0..5, row 1 starts at 5, row 2 at 9
        assert_eq!(triangle_index(0, 0, n), 0);
        assert_eq!(triangle_index(0, 4, n), 4);
        assert_eq!(triangle_index(1, 1, n), 5);
        assert_eq!(triangle_index(2, 2, n), 9);
        assert_eq!(triangle_index(4, 4, n), packed_len(n) - 1);
    }

    #[test]
    fn test_symmetric_access() {
        let mut w = SymmetricWeights::zeros(4);
        w.accumulate(1, 3, 0.5);
        w.accumulate(3, 1, 0.25);

        assert_eq!(w.get(1, 3), 0.75);
        assert_eq!(w.get(3, 1), 0.75);
    }

    #[test]
    fn test_fill_keeps_diagonal_zero() {
        let mut w = SymmetricWeights::zeros(4);
        w.fill(2.0);

        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 0.0 } else { 2.0 };
                assert_eq!(w.get(i, j), expected);
            }
        }
    }

    #[test]
    fn test_to_dense() {
        let mut w = SymmetricWeights::zeros(3);
        w.accumulate(0, 2, -1.0);

        assert_eq!(w.cells.len(), packed_len(3));

        let dense = w.to_dense();
        assert_eq!(dense.dim(), (3, 3));
        assert_eq!(dense[[0, 2]], -1.0);
        assert_eq!(dense[[2, 0]], -1.0);
        assert_eq!(dense[[1, 1]], 0.0);
    }

    #[test]
    #[should_panic(expected = "self-connections")]
    fn test_accumulate_rejects_diagonal() {
        let mut w = SymmetricWeights::zeros(3);
        w.accumulate(1, 1, 1.0);
    }
}
