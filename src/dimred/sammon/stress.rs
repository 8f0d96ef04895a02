//! Sammon stress functional.
//!
//! ```text
//! E = 1/c * sum_{i<j} (d_out(i,j) - d_in(i,j))^2 / d_in(i,j),    c = sum_{i<j} d_in(i,j)
//! ```

use anyhow::bail;

use crate::SammonError;
use crate::distance::DistanceMatrix;
use crate::FloatOps;

/// Sum of the input-space distances over all unordered pairs.
pub fn normalization_constant<T: FloatOps>(input: &DistanceMatrix<T>) -> T {
    input.upper_triangle_sum()
}

/// Sammon stress of a layout given its distances, the input distances and the constant `c`.
///
/// The division by the input distance is not guarded: a zero input distance between two
/// distinct points yields a non-finite result.
pub fn sammon_stress<T: FloatOps>(
    input: &DistanceMatrix<T>,
    output: &DistanceMatrix<T>,
    c: T,
) -> T {
    let n = input.len();
    let mut sum = T::zero();
    for i in 0..n {
        for j in (i + 1)..n {
            let d_in = input[[i, j]];
            let diff = output[[i, j]] - d_in;
            sum += diff * diff / d_in;
        }
    }
    sum / c
}

/// Stress evaluator bound to a fixed input distance matrix.
#[derive(Debug)]
pub struct StressFunction<'a, T: FloatOps> {
    input: &'a DistanceMatrix<T>,
    constant: T,
}

impl<'a, T: FloatOps> StressFunction<'a, T> {
    /// Computes the normalisation constant once and rejects inputs for which stress is
    /// undefined: fewer than two points, a non-finite distance, or every pair at distance
    /// zero.
    pub fn new(input: &'a DistanceMatrix<T>) -> anyhow::Result<Self> {
        if input.len() < 2 {
            bail!(SammonError::TooFewPoints(input.len()));
        }
        if let Some(((i, j), d)) = input.view().indexed_iter().find(|(_, d)| !d.is_finite()) {
            bail!(SammonError::InvalidDistanceMatrix(format!(
                "entry ({}, {}) is {}, expected a finite value",
                i, j, d
            )));
        }
        let constant = normalization_constant(input);
        if constant == T::zero() {
            bail!(SammonError::AllPointsCoincide(input.len()));
        }
        Ok(Self { input, constant })
    }

    pub fn constant(&self) -> T {
        self.constant
    }

    pub fn input(&self) -> &'a DistanceMatrix<T> {
        self.input
    }

    pub fn evaluate(&self, output: &DistanceMatrix<T>) -> T {
        sammon_stress(self.input, output, self.constant)
    }
}
