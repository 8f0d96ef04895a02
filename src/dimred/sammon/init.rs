//! Starting layouts.

use anyhow::bail;
use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::{FloatOps, SammonError};

/// How the 2-D layout is seeded before the first iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum Initialization<T> {
    /// Every coordinate drawn independently from a standard normal distribution.
    Random,
    /// Projection of the centred input onto its first two principal axes.
    ///
    /// Requires input coordinates, so it is unavailable when fitting from distances.
    Pca,
    /// A caller-supplied `n x 2` layout.
    Provided(Array2<T>),
}

impl<T> Default for Initialization<T> {
    fn default() -> Self {
        Self::Random
    }
}

pub(crate) fn random_layout<T, R>(n: usize, rng: &mut R) -> Array2<T>
where
    T: FloatOps,
    R: Rng + ?Sized,
{
    Array2::from_shape_fn((n, 2), |_| {
        let value: f64 = StandardNormal.sample(&mut *rng);
        T::cast(value)
    })
}

pub(crate) fn provided_layout<T: FloatOps>(
    layout: &Array2<T>,
    n: usize,
) -> anyhow::Result<Array2<T>> {
    if layout.dim() != (n, 2) {
        bail!(SammonError::ShapeMismatch {
            expected: (n, 2),
            found: layout.dim(),
        });
    }
    if layout.iter().any(|v| !v.is_finite()) {
        bail!(SammonError::InvalidParameter {
            name: "initialization",
            reason: "provided layout contains non-finite coordinates".to_string(),
        });
    }
    Ok(layout.clone())
}

/// Scores of the first two principal components. A missing second component (one input
/// dimension) is left at zero.
pub(crate) fn pca_layout<T: FloatOps>(points: ArrayView2<T>) -> anyhow::Result<Array2<T>> {
    let (n, d) = points.dim();
    let mut layout = Array2::zeros((n, 2));
    if n == 0 || d == 0 {
        return Ok(layout);
    }

    let n_t = n as f64;
    let means: Vec<f64> = (0..d)
        .map(|j| {
            points
                .column(j)
                .iter()
                .map(|v| v.to_f64().unwrap_or(f64::NAN))
                .sum::<f64>()
                / n_t
        })
        .collect();
    let centered = DMatrix::<f64>::from_fn(n, d, |i, j| {
        points[[i, j]].to_f64().unwrap_or(f64::NAN) - means[j]
    });

    let svd = centered.clone().svd(false, true);
    let v_t = svd
        .v_t
        .ok_or_else(|| anyhow::anyhow!("SVD did not produce right singular vectors"))?;

    for k in 0..v_t.nrows().min(2) {
        let scores = &centered * v_t.row(k).transpose();
        for i in 0..n {
            layout[[i, k]] = T::cast(scores[i]);
        }
    }

    Ok(layout)
}
