//! Dense `f64` matrices for the benchmark fixture
//!
//! A thin wrapper over `nalgebra::DMatrix<f64>`: the wrapper validates shapes
//! and reports errors as [`MatbenchError`], nalgebra does the arithmetic.
//! Constructors take row-major data.
//!
//! ```
//! use matbench::Matrix;
//!
//! let m = Matrix::zeros(2, 3);
//! assert_eq!(m.shape(), (2, 3));
//! ```

use nalgebra::DMatrix;
use rand::Rng;
use tracing::instrument;

use crate::MatbenchError;

/// Dense matrix backed by nalgebra
///
/// ```
/// use matbench::Matrix;
///
/// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(m.get(1, 0), Some(&3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    inner: DMatrix<f64>,
}

impl Matrix {
    /// `rows x cols` of zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            inner: DMatrix::zeros(rows, cols),
        }
    }

    /// Builds a matrix from row-major data
    ///
    /// # Errors
    ///
    /// `SizeMismatch` if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatbenchError> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(MatbenchError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            inner: DMatrix::from_row_iterator(rows, cols, data),
        })
    }

    /// Alias of [`Matrix::new`]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols)
    }

    /// `n x n` identity
    pub fn identity(n: usize) -> Self {
        Self {
            inner: DMatrix::identity(n, n),
        }
    }

    /// `n x n` matrix of independent uniform samples in `[0, 1)`
    ///
    /// ```
    /// use matbench::Matrix;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let m = Matrix::random(4, &mut rng);
    /// assert!(m.as_nalgebra().iter().all(|v| (0.0..1.0).contains(v)));
    /// ```
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        Self {
            inner: DMatrix::from_fn(n, n, |_, _| rng.gen::<f64>()),
        }
    }

    pub fn rows(&self) -> usize {
        self.inner.nrows()
    }

    pub fn cols(&self) -> usize {
        self.inner.ncols()
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    pub fn is_square(&self) -> bool {
        self.inner.is_square()
    }

    /// Element at `(row, col)`, `None` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Option<&f64> {
        self.inner.get((row, col))
    }

    /// Elements in row-major order
    pub fn to_row_major(&self) -> Vec<f64> {
        self.inner.transpose().as_slice().to_vec()
    }

    /// Borrow the nalgebra storage
    pub fn as_nalgebra(&self) -> &DMatrix<f64> {
        &self.inner
    }

    /// Unwrap into the nalgebra storage
    pub fn into_nalgebra(self) -> DMatrix<f64> {
        self.inner
    }

    /// Product `self x other` through nalgebra's GEMM; neither operand changes
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the inner dimensions differ.
    ///
    /// ```
    /// use matbench::Matrix;
    ///
    /// let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
    /// assert_eq!(a.matmul(&b).unwrap().to_row_major(), vec![19.0, 22.0, 43.0, 50.0]);
    /// ```
    #[instrument(skip_all, fields(lhs = ?self.shape(), rhs = ?other.shape()))]
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix, MatbenchError> {
        if self.cols() != other.rows() {
            return Err(MatbenchError::InvalidInput(format!(
                "cannot multiply {}x{} by {}x{}: inner dimensions differ",
                self.rows(),
                self.cols(),
                other.rows(),
                other.cols()
            )));
        }
        Ok(Self {
            inner: &self.inner * &other.inner,
        })
    }

    /// Swaps rows and columns
    pub fn transpose(&self) -> Matrix {
        Self {
            inner: self.inner.transpose(),
        }
    }
}

impl From<DMatrix<f64>> for Matrix {
    fn from(inner: DMatrix<f64>) -> Self {
        Self { inner }
    }
}
