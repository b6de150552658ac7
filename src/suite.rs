//! Benchmark suites: a setup step plus named, independently timed operations
//!
//! An external driver (criterion in `benches/numeric_suite.rs`) discovers the
//! operations through [`BenchmarkSuite::operations`]. Every operation name
//! carries the `time_` prefix, and the driver calls [`BenchmarkSuite::setup`]
//! to build a fresh fixture before measuring each one.
//!
//! # Example
//!
//! ```
//! use matbench::{BenchmarkSuite, NumericSuite};
//!
//! let suite = NumericSuite::with_seed(8, 42);
//! for op in NumericSuite::operations() {
//!     assert!(op.name().starts_with("time_"));
//!     op.run(&suite).unwrap();
//! }
//! ```

use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::{eigenvalues, Matrix, Result};

/// Dimension of the square fixture matrix used by [`NumericSuite::setup`]
pub const FIXTURE_SIZE: usize = 1000;

/// Prefix every timed operation name carries
pub const OPERATION_PREFIX: &str = "time_";

/// A suite of benchmarks sharing one fixture
pub trait BenchmarkSuite: Sized {
    /// Group name reported by drivers
    const NAME: &'static str;

    /// Builds a fresh fixture; called before each operation is measured
    ///
    /// # Errors
    ///
    /// Propagates any failure while constructing the fixture.
    fn setup() -> Result<Self>;

    /// Timed operations in declaration order
    fn operations() -> Vec<TimedOperation<Self>>;
}

/// A named operation that borrows the suite fixture immutably
pub struct TimedOperation<S> {
    name: &'static str,
    func: fn(&S) -> Result<()>,
}

impl<S> TimedOperation<S> {
    /// Wraps `func` under `name`
    pub const fn new(name: &'static str, func: fn(&S) -> Result<()>) -> Self {
        Self { name, func }
    }

    /// Operation name, including the `time_` prefix
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Calls the operation once without timing it
    ///
    /// # Errors
    ///
    /// Propagates the operation's own failure.
    pub fn call(&self, suite: &S) -> Result<()> {
        (self.func)(suite)
    }

    /// Runs the operation once and returns the wall-clock time it took
    ///
    /// # Errors
    ///
    /// Propagates the operation's own failure.
    pub fn run(&self, suite: &S) -> Result<Duration> {
        let start = Instant::now();
        self.call(suite)?;
        let elapsed = start.elapsed();
        debug!(operation = self.name, ?elapsed, "operation finished");
        Ok(elapsed)
    }
}

impl<S> Clone for TimedOperation<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for TimedOperation<S> {}

impl<S> fmt::Debug for TimedOperation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedOperation")
            .field("name", &self.name)
            .finish()
    }
}

/// Dense matrix multiplication and eigenvalue benchmarks on one random fixture
#[derive(Debug, Clone)]
pub struct NumericSuite {
    fixture: Matrix,
}

impl NumericSuite {
    /// Builds a suite around a random `n x n` fixture from OS entropy
    pub fn with_size(n: usize) -> Self {
        let fixture = Matrix::random(n, &mut rand::thread_rng());
        debug!(n, "numeric fixture ready");
        Self { fixture }
    }

    /// Builds a suite around a reproducible random `n x n` fixture
    pub fn with_seed(n: usize, seed: u64) -> Self {
        let fixture = Matrix::random(n, &mut StdRng::seed_from_u64(seed));
        debug!(n, seed, "numeric fixture ready");
        Self { fixture }
    }

    /// Wraps an existing matrix as the fixture
    pub fn from_matrix(fixture: Matrix) -> Self {
        Self { fixture }
    }

    /// The shared fixture
    pub fn fixture(&self) -> &Matrix {
        &self.fixture
    }

    /// Multiplies the fixture by itself with nalgebra's GEMM; the product is
    /// discarded
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the fixture is not square.
    pub fn time_matrix_multiply(&self) -> Result<()> {
        let fixture = black_box(&self.fixture);
        black_box(fixture.matmul(fixture)?);
        Ok(())
    }

    /// Computes the fixture's eigenvalues; the values are discarded
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a non-square or empty fixture, `NonConvergence` if
    /// the QR iteration fails.
    pub fn time_eigenvalues(&self) -> Result<()> {
        let values = eigenvalues(&self.fixture)?;
        black_box(values);
        Ok(())
    }
}

impl BenchmarkSuite for NumericSuite {
    const NAME: &'static str = "numeric";

    fn setup() -> Result<Self> {
        Ok(Self::with_size(FIXTURE_SIZE))
    }

    fn operations() -> Vec<TimedOperation<Self>> {
        vec![
            TimedOperation::new("time_matrix_multiply", Self::time_matrix_multiply),
            TimedOperation::new("time_eigenvalues", Self::time_eigenvalues),
        ]
    }
}
