//! # Sammon Mapping
//!
//! Nonlinear projection of `n` points into two dimensions that preserves pairwise distances,
//! weighting small distances more heavily than large ones. The layout is improved by a
//! diagonal quasi-Newton step per point until the stress stops decreasing by at least
//! `epsilon` or the iteration cap is reached.
//!
//! Each iteration:
//! 1. computes the layout distance matrix,
//! 2. evaluates the stress against the input distances,
//! 3. stops if the stress improved by less than `epsilon`, returning the layout unchanged,
//! 4. otherwise moves every point (see [`UpdateSchedule`]).

mod init;
pub mod stress;
mod update;

use anyhow::bail;
use log::{debug, info, warn};
use ndarray::{Array2, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::distance::DistanceMatrix;
use crate::{FloatOps, SammonError};
use stress::StressFunction;

pub use init::Initialization;
pub use update::{UpdateSchedule, DENOMINATOR_FLOOR};

/// Handling of numeric hazards in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
    /// Distinct input points at distance zero are accepted. The stress then divides by zero
    /// and the run continues with non-finite values.
    #[default]
    Lenient,
    /// Distinct input points at distance zero are rejected before the run starts, and a
    /// non-finite stress aborts the run.
    Strict,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The stress improvement at `iteration` fell below `epsilon`; that iteration's update was
    /// not applied.
    Converged { iteration: usize },
    /// Every iteration up to the cap applied its update.
    MaxIterations,
}

/// Progress of a single iteration, passed to observers before the update is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport<T> {
    pub iteration: usize,
    pub stress: T,
    /// Previous stress minus this one; infinite on the first iteration.
    pub improvement: T,
}

#[derive(Debug, Clone)]
pub struct SammonResult<T> {
    /// Final `n x 2` layout.
    pub embedding: Array2<T>,
    /// Stress of `embedding`.
    pub final_stress: T,
    /// Stress evaluated at the start of each iteration, in order.
    pub stress_history: Vec<T>,
    /// Number of iterations whose update was applied.
    pub iterations: usize,
    pub termination: Termination,
    /// Number of times `d_out * d_in` was raised to [`DENOMINATOR_FLOOR`].
    pub clamped_denominators: usize,
}

impl<T> SammonResult<T> {
    pub fn converged(&self) -> bool {
        matches!(self.termination, Termination::Converged { .. })
    }
}

/// Sammon mapping into two dimensions.
///
/// Build with [`SammonBuilder`]; `Sammon::default()` uses the builder defaults.
#[derive(Debug, Clone)]
pub struct Sammon<T: FloatOps> {
    max_iterations: usize,
    epsilon: T,
    alpha: T,
    random_seed: Option<u64>,
    numeric_policy: NumericPolicy,
    initialization: Initialization<T>,
    update_schedule: UpdateSchedule,
}

impl<T: FloatOps> Default for Sammon<T> {
    fn default() -> Self {
        SammonBuilder::new().build()
    }
}

impl<T: FloatOps> Sammon<T> {
    pub fn builder() -> SammonBuilder<T> {
        SammonBuilder::new()
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    pub fn alpha(&self) -> T {
        self.alpha
    }

    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    pub fn numeric_policy(&self) -> NumericPolicy {
        self.numeric_policy
    }

    /// Maps the rows of `x` (samples × features) into two dimensions.
    ///
    /// The random starting layout is drawn from a ChaCha8 generator seeded with
    /// `random_seed`, or from the thread-local generator when no seed was set.
    pub fn fit(&self, x: ArrayView2<T>) -> anyhow::Result<SammonResult<T>> {
        let mut rng = self.seeded_rng();
        self.fit_with_observer(x, &mut rng, |_| {})
    }

    /// Like [`fit`](Self::fit), drawing the starting layout from `rng`.
    pub fn fit_with_rng<R>(
        &self,
        x: ArrayView2<T>,
        rng: &mut R,
    ) -> anyhow::Result<SammonResult<T>>
    where
        R: Rng + ?Sized,
    {
        self.fit_with_observer(x, rng, |_| {})
    }

    /// Like [`fit_with_rng`](Self::fit_with_rng), calling `observer` once per iteration.
    pub fn fit_with_observer<R, F>(
        &self,
        x: ArrayView2<T>,
        rng: &mut R,
        observer: F,
    ) -> anyhow::Result<SammonResult<T>>
    where
        R: Rng + ?Sized,
        F: FnMut(&IterationReport<T>),
    {
        for ((row, column), value) in x.indexed_iter() {
            if !value.is_finite() {
                bail!(SammonError::NonFiniteInput { row, column });
            }
        }
        let input = DistanceMatrix::from_points(x);
        self.run(&input, Some(x), rng, observer)
    }

    /// Maps points given only by their pairwise input distances.
    ///
    /// [`Initialization::Pca`] is rejected since it needs coordinates.
    pub fn fit_distances<R>(
        &self,
        input: &DistanceMatrix<T>,
        rng: &mut R,
    ) -> anyhow::Result<SammonResult<T>>
    where
        R: Rng + ?Sized,
    {
        self.run(input, None, rng, |_| {})
    }

    fn seeded_rng(&self) -> ChaCha8Rng {
        match self.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.max_iterations == 0 {
            bail!(SammonError::InvalidParameter {
                name: "max_iterations",
                reason: "must be greater than 0".to_string(),
            });
        }
        if !self.epsilon.is_finite() || self.epsilon < T::zero() {
            bail!(SammonError::InvalidParameter {
                name: "epsilon",
                reason: format!("must be finite and non-negative, got {}", self.epsilon),
            });
        }
        if !self.alpha.is_finite() || self.alpha <= T::zero() {
            bail!(SammonError::InvalidParameter {
                name: "alpha",
                reason: format!("must be finite and positive, got {}", self.alpha),
            });
        }
        Ok(())
    }

    fn initial_layout<R>(
        &self,
        n: usize,
        points: Option<ArrayView2<T>>,
        rng: &mut R,
    ) -> anyhow::Result<Array2<T>>
    where
        R: Rng + ?Sized,
    {
        match (&self.initialization, points) {
            (Initialization::Random, _) => Ok(init::random_layout(n, rng)),
            (Initialization::Provided(layout), _) => init::provided_layout(layout, n),
            (Initialization::Pca, Some(points)) => init::pca_layout(points),
            (Initialization::Pca, None) => bail!(SammonError::InvalidParameter {
                name: "initialization",
                reason: "PCA initialization needs input coordinates, not distances".to_string(),
            }),
        }
    }

    fn run<R, F>(
        &self,
        input: &DistanceMatrix<T>,
        points: Option<ArrayView2<T>>,
        rng: &mut R,
        mut observer: F,
    ) -> anyhow::Result<SammonResult<T>>
    where
        R: Rng + ?Sized,
        F: FnMut(&IterationReport<T>),
    {
        self.validate()?;
        let stress_fn = StressFunction::new(input)?;
        let c = stress_fn.constant();

        if let Some((first, second)) = input.coincident_pair() {
            match self.numeric_policy {
                NumericPolicy::Strict => bail!(SammonError::CoincidentPoints { first, second }),
                NumericPolicy::Lenient => warn!(
                    "input points {} and {} coincide; stress will not be finite",
                    first, second
                ),
            }
        }

        let mut layout = self.initial_layout(input.len(), points, rng)?;
        let mut scratch = Array2::zeros((0, 0));

        let mut previous = T::infinity();
        let mut stress_history = Vec::new();
        let mut iterations = 0;
        let mut clamped_denominators = 0;
        let mut termination = Termination::MaxIterations;
        let mut converged_stress = None;

        for iteration in 1..=self.max_iterations {
            let output = DistanceMatrix::from_points(layout.view());
            let stress = stress_fn.evaluate(&output);
            let improvement = previous - stress;
            stress_history.push(stress);

            debug!(
                "iteration {}: stress = {}, improvement = {}",
                iteration, stress, improvement
            );
            observer(&IterationReport {
                iteration,
                stress,
                improvement,
            });

            if self.numeric_policy == NumericPolicy::Strict && !stress.is_finite() {
                bail!(SammonError::NonFiniteStress { iteration });
            }

            if improvement < self.epsilon {
                termination = Termination::Converged { iteration };
                converged_stress = Some(stress);
                break;
            }
            previous = stress;

            clamped_denominators += update::apply_update(
                &mut layout,
                &mut scratch,
                input,
                &output,
                c,
                self.alpha,
                self.update_schedule,
            );
            iterations += 1;
        }

        let final_stress = match converged_stress {
            Some(stress) => stress,
            None => stress_fn.evaluate(&DistanceMatrix::from_points(layout.view())),
        };

        if clamped_denominators > 0 {
            warn!(
                "{} layout denominators were raised to {}",
                clamped_denominators, DENOMINATOR_FLOOR
            );
        }
        match termination {
            Termination::Converged { iteration } => info!(
                "Sammon mapping converged at iteration {} with stress {}",
                iteration, final_stress
            ),
            Termination::MaxIterations => info!(
                "Sammon mapping reached {} iterations with stress {}",
                self.max_iterations, final_stress
            ),
        }

        Ok(SammonResult {
            embedding: layout,
            final_stress,
            stress_history,
            iterations,
            termination,
            clamped_denominators,
        })
    }
}

/// Builder for [`Sammon`].
///
/// # Example Usage
/// ```ignore
/// let sammon = SammonBuilder::<f64>::new()
///     .max_iterations(200)
///     .alpha(0.3)
///     .random_seed(42)
///     .build();
/// let result = sammon.fit(data.view())?;
/// ```
#[derive(Debug, Clone)]
pub struct SammonBuilder<T: FloatOps> {
    max_iterations: usize,
    epsilon: T,
    alpha: T,
    random_seed: Option<u64>,
    numeric_policy: NumericPolicy,
    initialization: Initialization<T>,
    update_schedule: UpdateSchedule,
}

impl<T: FloatOps> Default for SammonBuilder<T> {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            epsilon: T::cast(1e-7),
            alpha: T::cast(0.3),
            random_seed: None,
            numeric_policy: NumericPolicy::default(),
            initialization: Initialization::default(),
            update_schedule: UpdateSchedule::default(),
        }
    }
}

impl<T: FloatOps> SammonBuilder<T> {
    /// Creates a new builder with default parameters.
    ///
    /// Default values:
    /// - `max_iterations`: 500
    /// - `epsilon`: 1e-7
    /// - `alpha`: 0.3
    /// - `random_seed`: none
    /// - `numeric_policy`: Lenient
    /// - `initialization`: Random
    /// - `update_schedule`: InPlace
    pub fn new() -> Self {
        Self::default()
    }

    /// Hard cap on the number of iterations.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// The run stops once the stress decreases by less than `epsilon` between iterations.
    pub fn epsilon(mut self, epsilon: T) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Step size multiplier.
    pub fn alpha(mut self, alpha: T) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.numeric_policy = policy;
        self
    }

    pub fn initialization(mut self, initialization: Initialization<T>) -> Self {
        self.initialization = initialization;
        self
    }

    pub fn update_schedule(mut self, schedule: UpdateSchedule) -> Self {
        self.update_schedule = schedule;
        self
    }

    pub fn build(self) -> Sammon<T> {
        Sammon {
            max_iterations: self.max_iterations,
            epsilon: self.epsilon,
            alpha: self.alpha,
            random_seed: self.random_seed,
            numeric_policy: self.numeric_policy,
            initialization: self.initialization,
            update_schedule: self.update_schedule,
        }
    }
}
