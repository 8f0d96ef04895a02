//! # Dimensionality Reduction
//!
//! Algorithms that embed high-dimensional points in a low-dimensional space for
//! visualisation.
//!
//! ## Currently Available
//! - **Sammon mapping** ([`sammon`]): nonlinear 2-D projection that preserves pairwise
//!   distances, favouring small ones

pub mod sammon;
