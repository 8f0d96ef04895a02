//! Per-point diagonal Newton step.
//!
//! For point `i` the first and second partial derivatives of the stress are accumulated over
//! every other point `j`, and the point moves by `alpha * g / |h|` per coordinate. Only the
//! magnitude of the second derivative is used, so the step always points downhill.

use ndarray::{Array2, ArrayView2};

use crate::distance::DistanceMatrix;
use crate::FloatOps;

/// Lower bound applied to `d_out(i,j) * d_in(i,j)` before it is used as a divisor.
pub const DENOMINATOR_FLOOR: f64 = 1e-6;

/// Displacement of one point plus the number of denominators that hit the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PointStep<T> {
    pub delta: [T; 2],
    pub clamped: usize,
}

/// How the per-point steps of one iteration are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateSchedule {
    /// Points move one after another in index order; later points see the new positions of
    /// earlier ones.
    #[default]
    InPlace,
    /// Every step is computed from the layout as it stood at the start of the iteration and
    /// written to a second buffer that replaces the layout afterwards.
    Snapshot,
}

/// Step for point `i`.
///
/// `output` must hold the layout distances the iteration started from; `layout` supplies the
/// coordinate differences.
pub(crate) fn point_step<T: FloatOps>(
    i: usize,
    layout: ArrayView2<T>,
    input: &DistanceMatrix<T>,
    output: &DistanceMatrix<T>,
    c: T,
    alpha: T,
) -> PointStep<T> {
    let floor = T::cast(DENOMINATOR_FLOOR);
    let mut first = [T::zero(); 2];
    let mut second = [T::zero(); 2];
    let mut clamped = 0;

    for j in 0..layout.nrows() {
        if j == i {
            continue;
        }
        let d_in = input[[i, j]];
        let d_out = output[[i, j]];

        let mut denom = d_out * d_in;
        if denom < floor {
            log::trace!("clamped denominator {} for pair ({}, {})", denom, i, j);
            denom = floor;
            clamped += 1;
        }
        let diff = d_out - d_in;

        for k in 0..2 {
            let delta = layout[[i, k]] - layout[[j, k]];
            first[k] += diff / denom * delta;
            second[k] += (diff - (delta * delta / d_in) * (T::one() + diff / d_in)) / denom;
        }
    }

    let scale = -T::cast(2.0) / c;
    let mut delta = [T::zero(); 2];
    for k in 0..2 {
        delta[k] = alpha * (first[k] * scale) / (second[k] * scale).abs();
    }
    PointStep { delta, clamped }
}

/// Moves every point of `layout` once and returns the number of clamped denominators.
///
/// `scratch` is the write buffer of the snapshot schedule; it is resized as needed and left
/// holding the previous layout.
pub(crate) fn apply_update<T: FloatOps>(
    layout: &mut Array2<T>,
    scratch: &mut Array2<T>,
    input: &DistanceMatrix<T>,
    output: &DistanceMatrix<T>,
    c: T,
    alpha: T,
    schedule: UpdateSchedule,
) -> usize {
    let n = layout.nrows();
    let mut clamped = 0;

    match schedule {
        UpdateSchedule::InPlace => {
            for i in 0..n {
                let step = point_step(i, layout.view(), input, output, c, alpha);
                layout[[i, 0]] += step.delta[0];
                layout[[i, 1]] += step.delta[1];
                clamped += step.clamped;
            }
        }
        UpdateSchedule::Snapshot => {
            if scratch.dim() != layout.dim() {
                *scratch = Array2::zeros(layout.dim());
            }
            scratch.assign(layout);
            for i in 0..n {
                let step = point_step(i, layout.view(), input, output, c, alpha);
                scratch[[i, 0]] += step.delta[0];
                scratch[[i, 1]] += step.delta[1];
                clamped += step.clamped;
            }
            std::mem::swap(layout, scratch);
        }
    }

    clamped
}
