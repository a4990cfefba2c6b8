use thiserror::Error;

/// Errors that can occur when decomposing a matrix.
///
/// Finite, non-empty square input never fails with the default
/// [`PolarOptions`](crate::PolarOptions): every variant is either a violated
/// precondition or an exhausted iteration budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolarError {
    /// The input matrix is not square.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    /// The input matrix has no entries.
    #[error("matrix is empty")]
    Empty,
    /// The input matrix contains NaN or infinite entries.
    #[error("matrix contains non-finite entries")]
    NonFinite,
    /// The SVD did not converge within the configured iteration budget.
    #[error("svd did not converge within {max_iters} iterations")]
    NoConvergence { max_iters: usize },
    /// The SVD returned without singular vectors.
    #[error("svd failed to produce singular vectors")]
    SvdFailed,
    /// Row-major input rows have different lengths.
    #[error("row {row} has {len} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// Too few point pairs for rigid alignment.
    #[error("need at least 3 point pairs, got {0}")]
    NotEnoughPoints(usize),
    /// Point sets to be aligned differ in length.
    #[error("point sets differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}
