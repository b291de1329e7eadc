//! statreport - resampling-based statistical reports
//!
//! This library provides the computational core of two short reports:
//! a Monte Carlo demonstration of the central limit theorem for the mean of
//! exponential draws, and pairwise plus permutation hypothesis testing of the
//! tooth growth dataset. Results are plain serializable structs; rendering is
//! left to the caller.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod inference;
pub mod random;
pub mod report;
pub mod simulation;

pub use error::{InferenceError, Result};
