//! # Pairwise Distances
//!
//! Dense distance matrices over the rows of a point set. The same routine is used for the
//! fixed input space and for the evolving 2-D layout of a Sammon run.

use std::ops::Index;

use anyhow::bail;
use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::FloatOps;
use crate::SammonError;

/// A metric between two points of equal dimension.
pub trait DistanceMetric {
    fn distance<T: FloatOps>(&self, a: ArrayView1<T>, b: ArrayView1<T>) -> T;
}

/// Straight-line (L2) distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn distance<T: FloatOps>(&self, a: ArrayView1<T>, b: ArrayView1<T>) -> T {
        let mut squared_dist = T::zero();
        for (&x, &y) in a.iter().zip(b.iter()) {
            let diff = x - y;
            squared_dist += diff * diff;
        }
        squared_dist.sqrt()
    }
}

/// Symmetric, zero-diagonal matrix of pairwise distances.
///
/// Entry `(i, j)` holds the distance between row `i` and row `j` of the point set it was
/// built from. An empty point set yields a `0 x 0` matrix and a single point a `1 x 1` zero
/// matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<T> {
    data: Array2<T>,
}

impl<T: FloatOps> DistanceMatrix<T> {
    /// Euclidean distances between all rows of `points`.
    pub fn from_points(points: ArrayView2<T>) -> Self {
        Self::from_points_with(points, &Euclidean)
    }

    /// Distances between all rows of `points` under `metric`.
    ///
    /// Each unordered pair is evaluated once and mirrored, so the result is exactly symmetric.
    pub fn from_points_with<M: DistanceMetric>(points: ArrayView2<T>, metric: &M) -> Self {
        let n = points.nrows();
        let mut data = Array2::zeros((n, n));
        for i in 0..n {
            let row_i = points.row(i);
            for j in (i + 1)..n {
                let d = metric.distance(row_i, points.row(j));
                data[[i, j]] = d;
                data[[j, i]] = d;
            }
        }
        Self { data }
    }

    /// Adopts a precomputed matrix.
    ///
    /// The matrix must be square, finite, non-negative, exactly symmetric and have a zero
    /// diagonal.
    pub fn from_array(data: Array2<T>) -> anyhow::Result<Self> {
        let (rows, cols) = data.dim();
        if rows != cols {
            bail!(SammonError::InvalidDistanceMatrix(format!(
                "expected a square matrix, got {} x {}",
                rows, cols
            )));
        }
        for i in 0..rows {
            if data[[i, i]] != T::zero() {
                bail!(SammonError::InvalidDistanceMatrix(format!(
                    "diagonal entry ({}, {}) is {}, expected 0",
                    i, i, data[[i, i]]
                )));
            }
            for j in (i + 1)..rows {
                let d = data[[i, j]];
                if !d.is_finite() || d < T::zero() {
                    bail!(SammonError::InvalidDistanceMatrix(format!(
                        "entry ({}, {}) is {}, expected a finite non-negative value",
                        i, j, d
                    )));
                }
                if d != data[[j, i]] {
                    bail!(SammonError::InvalidDistanceMatrix(format!(
                        "entries ({}, {}) and ({}, {}) differ",
                        i, j, j, i
                    )));
                }
            }
        }
        Ok(Self { data })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[[i, j]]
    }

    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array2<T> {
        self.data
    }

    /// Sum over the strict upper triangle, i.e. over every unordered pair once.
    pub fn upper_triangle_sum(&self) -> T {
        let n = self.len();
        let mut sum = T::zero();
        for i in 0..n {
            for j in (i + 1)..n {
                sum += self.data[[i, j]];
            }
        }
        sum
    }

    /// First pair `(i, j)` with `i < j` at distance zero, in row-major order.
    pub fn coincident_pair(&self) -> Option<(usize, usize)> {
        let n = self.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.data[[i, j]] == T::zero() {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

impl<T> Index<[usize; 2]> for DistanceMatrix<T> {
    type Output = T;

    fn index(&self, index: [usize; 2]) -> &T {
        &self.data[index]
    }
}
