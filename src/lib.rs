pub mod dimred;
pub mod distance;
mod error;
mod utils;

pub use dimred::sammon::{
    Initialization, IterationReport, NumericPolicy, Sammon, SammonBuilder, SammonResult,
    Termination, UpdateSchedule,
};
pub use distance::{DistanceMatrix, DistanceMetric, Euclidean};
pub use error::SammonError;
pub use utils::FloatOps;
