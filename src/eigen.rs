//! Eigenvalues of general (non-symmetric) real matrices
//!
//! The benchmark fixture is a dense random matrix, so its spectrum is complex in
//! general. Eigenvalues are read off the real Schur form computed by nalgebra
//! (Hessenberg reduction followed by shifted QR iterations). Eigenvectors are
//! never formed.
//!
//! # Example
//!
//! ```
//! use matbench::{eigenvalues, Matrix};
//!
//! // Rotation by 90 degrees: eigenvalues ±i
//! let m = Matrix::from_vec(2, 2, vec![0.0, -1.0, 1.0, 0.0]).unwrap();
//! let values = eigenvalues(&m).unwrap();
//! assert_eq!(values.len(), 2);
//! assert!(values.iter().all(|v| v.re.abs() < 1e-12 && (v.im.abs() - 1.0).abs() < 1e-12));
//! ```

use nalgebra::linalg::Schur;
use nalgebra::Complex;
use tracing::{debug, instrument};

use crate::{MatbenchError, Matrix};

/// Iteration budget handed to the QR sweep before reporting non-convergence
pub const MAX_SCHUR_ITERATIONS: usize = 10_000;

/// Convergence tolerance for the sub-diagonal of the Schur form
pub const SCHUR_EPSILON: f64 = f64::EPSILON;

/// Computes the eigenvalues of a square matrix without eigenvectors
///
/// Complex conjugate pairs come out next to each other, in the order of the
/// diagonal blocks of the Schur form. The input matrix is not modified.
///
/// # Errors
///
/// - `InvalidInput` if the matrix is empty or not square
/// - `NonConvergence` if the QR iteration exhausts [`MAX_SCHUR_ITERATIONS`]
#[instrument(skip(matrix), fields(n = matrix.rows()))]
pub fn eigenvalues(matrix: &Matrix) -> Result<Vec<Complex<f64>>, MatbenchError> {
    eigenvalues_with_budget(matrix, MAX_SCHUR_ITERATIONS)
}

/// Same as [`eigenvalues`] with an explicit iteration budget
///
/// # Errors
///
/// See [`eigenvalues`]. A budget of zero is rejected as `InvalidInput`, since
/// nalgebra reads zero as "iterate forever".
pub fn eigenvalues_with_budget(
    matrix: &Matrix,
    max_iterations: usize,
) -> Result<Vec<Complex<f64>>, MatbenchError> {
    if !matrix.is_square() {
        return Err(MatbenchError::InvalidInput(format!(
            "Matrix must be square for eigenvalue computation, got {}x{}",
            matrix.rows(),
            matrix.cols()
        )));
    }

    if matrix.rows() == 0 {
        return Err(MatbenchError::InvalidInput(
            "Cannot compute eigenvalues of empty matrix".to_string(),
        ));
    }

    if max_iterations == 0 {
        return Err(MatbenchError::InvalidInput(
            "Iteration budget must be positive".to_string(),
        ));
    }

    let n = matrix.rows();
    // Schur works in place on an owned copy; the caller's matrix stays intact
    let work = matrix.as_nalgebra().clone();
    let schur = Schur::try_new(work, SCHUR_EPSILON, max_iterations).ok_or(
        MatbenchError::NonConvergence {
            size: n,
            iterations: max_iterations,
        },
    )?;

    let values: Vec<Complex<f64>> = schur.complex_eigenvalues().iter().copied().collect();
    debug!(
        count = values.len(),
        complex = values.iter().filter(|v| v.im != 0.0).count(),
        "eigenvalues computed"
    );

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted_real_parts(values: &[Complex<f64>]) -> Vec<f64> {
        let mut re: Vec<f64> = values.iter().map(|v| v.re).collect();
        re.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        re
    }

    #[test]
    fn test_diagonal_matrix() {
        let m = Matrix::from_vec(3, 3, vec![3.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 2.0])
            .unwrap();
        let values = eigenvalues(&m).unwrap();
        let re = sorted_real_parts(&values);
        assert!((re[0] + 1.0).abs() < 1e-12);
        assert!((re[1] - 2.0).abs() < 1e-12);
        assert!((re[2] - 3.0).abs() < 1e-12);
        assert!(values.iter().all(|v| v.im == 0.0));
    }

    #[test]
    fn test_upper_triangular_matrix() {
        let m = Matrix::from_vec(2, 2, vec![2.0, 5.0, 0.0, 7.0]).unwrap();
        let re = sorted_real_parts(&eigenvalues(&m).unwrap());
        assert!((re[0] - 2.0).abs() < 1e-10);
        assert!((re[1] - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_single_element() {
        let m = Matrix::from_vec(1, 1, vec![4.5]).unwrap();
        let values = eigenvalues(&m).unwrap();
        assert_eq!(values.len(), 1);
        assert!((values[0].re - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_non_square_rejected() {
        let m = Matrix::new(2, 3);
        assert!(matches!(
            eigenvalues(&m),
            Err(MatbenchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_rejected() {
        let m = Matrix::new(0, 0);
        assert!(matches!(
            eigenvalues(&m),
            Err(MatbenchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_budget_rejected() {
        let m = Matrix::identity(2);
        assert!(matches!(
            eigenvalues_with_budget(&m, 0),
            Err(MatbenchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_random_matrix_trace_and_conjugates() {
        let m = Matrix::random(40, &mut StdRng::seed_from_u64(11));
        let values = eigenvalues(&m).unwrap();
        assert_eq!(values.len(), 40);

        // Sum of eigenvalues equals the trace; imaginary parts cancel in pairs
        let trace: f64 = (0..40).map(|i| m.get(i, i).copied().unwrap_or(0.0)).sum();
        let sum_re: f64 = values.iter().map(|v| v.re).sum();
        let sum_im: f64 = values.iter().map(|v| v.im).sum();
        assert!((trace - sum_re).abs() < 1e-8, "trace {trace} vs {sum_re}");
        assert!(sum_im.abs() < 1e-8);
    }

    #[test]
    fn test_input_not_mutated() {
        let m = Matrix::random(12, &mut StdRng::seed_from_u64(5));
        let before = m.clone();
        let _ = eigenvalues(&m).unwrap();
        assert_eq!(m, before);
    }
}
