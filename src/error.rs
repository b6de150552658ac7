//! Error types for matbench kernels

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, MatbenchError>;

/// Failures while building a fixture or running a timed kernel
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatbenchError {
    /// Operand shape the kernel cannot handle
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Buffer length does not match the requested dimensions
    #[error("Size mismatch: expected {expected} elements, got {actual}")]
    SizeMismatch {
        /// `rows * cols`
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// QR sweep ran out of iterations before the Schur form settled
    #[error("Eigenvalue iteration did not converge for {size}x{size} matrix after {iterations} iterations")]
    NonConvergence {
        /// Matrix dimension
        size: usize,
        /// Budget that was exhausted
        iterations: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            MatbenchError::InvalidInput("empty fixture".into()).to_string(),
            "Invalid input: empty fixture"
        );
        assert_eq!(
            MatbenchError::SizeMismatch {
                expected: 9,
                actual: 8
            }
            .to_string(),
            "Size mismatch: expected 9 elements, got 8"
        );
        assert_eq!(
            MatbenchError::NonConvergence {
                size: 4,
                iterations: 100
            }
            .to_string(),
            "Eigenvalue iteration did not converge for 4x4 matrix after 100 iterations"
        );
    }

    #[test]
    fn test_result_alias_propagates() {
        fn inner() -> Result<()> {
            Err(MatbenchError::InvalidInput("x".into()))
        }
        fn outer() -> Result<u8> {
            inner()?;
            Ok(1)
        }
        assert!(matches!(outer(), Err(MatbenchError::InvalidInput(_))));
    }
}
