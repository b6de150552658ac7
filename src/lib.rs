//! matbench: dense linear algebra micro-benchmarks
//!
//! A fixed-size random matrix is built by a setup step and shared by two
//! independently timed operations:
//!
//! 1. **Matrix multiplication** - the fixture times itself
//! 2. **Eigenvalues** - spectrum of the fixture, no eigenvectors
//!
//! Timing is left to an external driver; `benches/numeric_suite.rs` runs the
//! suite under criterion.
//!
//! # Quick Start
//!
//! ```rust
//! use matbench::{BenchmarkSuite, NumericSuite};
//!
//! let suite = NumericSuite::with_seed(32, 7);
//! suite.time_matrix_multiply().unwrap();
//! suite.time_eigenvalues().unwrap();
//! assert_eq!(NumericSuite::operations().len(), 2);
//! ```

pub mod eigen;
pub mod error;
pub mod matrix;
pub mod suite;

pub use eigen::{eigenvalues, eigenvalues_with_budget, MAX_SCHUR_ITERATIONS};
pub use error::{MatbenchError, Result};
pub use matrix::Matrix;
pub use nalgebra::Complex;
pub use suite::{BenchmarkSuite, NumericSuite, TimedOperation, FIXTURE_SIZE};
