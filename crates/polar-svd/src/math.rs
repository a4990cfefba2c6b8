//! Type aliases and matrix diagnostics.
//!
//! The diagnostics operate on dynamic matrices so the same code measures the
//! fixed 3×3 and the general n×n decompositions.

use nalgebra::{DMatrix, Matrix3, Point3, Vector3};

use crate::PolarError;

/// Scalar type used by the report pipeline and point helpers (`f64`).
pub type Real = f64;

/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;
/// 3D point with [`Real`] coordinates.
pub type Pt3 = Point3<Real>;
/// 3×3 matrix with [`Real`] entries.
pub type Mat3 = Matrix3<Real>;
/// Dynamically sized matrix with [`Real`] entries.
pub type DMat = DMatrix<Real>;

/// Frobenius norm of `a - b`.
///
/// # Panics
///
/// Panics if the shapes differ.
pub fn frobenius_distance(a: &DMat, b: &DMat) -> Real {
    (a - b).norm()
}

/// Frobenius norm of `mᵀm - I`; zero for an orthogonal matrix.
pub fn orthogonality_error(m: &DMat) -> Real {
    let n = m.ncols();
    (m.tr_mul(m) - DMat::identity(n, n)).norm()
}

/// Frobenius norm of `m - mᵀ`; zero for a symmetric matrix.
pub fn symmetry_error(m: &DMat) -> Real {
    (m - m.transpose()).norm()
}

/// Copy a fixed 3×3 matrix into a dynamic one.
pub fn mat3_to_dmatrix(m: &Mat3) -> DMat {
    DMat::from_column_slice(3, 3, m.as_slice())
}

/// Row-major nested vectors from a dynamic matrix.
pub fn dmatrix_to_rows(m: &DMat) -> Vec<Vec<Real>> {
    m.row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

/// Build a square matrix from row-major nested vectors.
///
/// Rejects empty, ragged, and non-square input.
pub fn rows_to_dmatrix(rows: &[Vec<Real>]) -> Result<DMat, PolarError> {
    let ncols = match rows.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(PolarError::Empty),
    };
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        return Err(PolarError::RaggedRows {
            row,
            len: r.len(),
            expected: ncols,
        });
    }
    if rows.len() != ncols {
        return Err(PolarError::NotSquare {
            rows: rows.len(),
            cols: ncols,
        });
    }
    Ok(DMat::from_fn(ncols, ncols, |r, c| rows[r][c]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_round_trip_keeps_row_major_order() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let m = rows_to_dmatrix(&rows).unwrap();
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 0)], 3.0);
        assert_eq!(dmatrix_to_rows(&m), rows);
    }

    #[test]
    fn rows_reject_bad_shapes() {
        assert_eq!(rows_to_dmatrix(&[]), Err(PolarError::Empty));
        assert_eq!(rows_to_dmatrix(&[vec![]]), Err(PolarError::Empty));
        assert_eq!(
            rows_to_dmatrix(&[vec![1.0, 2.0], vec![3.0]]),
            Err(PolarError::RaggedRows {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            rows_to_dmatrix(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]),
            Err(PolarError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn diagnostics_vanish_on_identity() {
        let i = DMat::identity(4, 4);
        assert_eq!(orthogonality_error(&i), 0.0);
        assert_eq!(symmetry_error(&i), 0.0);
        assert_eq!(frobenius_distance(&i, &i), 0.0);
    }

    #[test]
    fn mat3_conversion_preserves_entries() {
        let m = Mat3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let d = mat3_to_dmatrix(&m);
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(d[(r, c)], m[(r, c)]);
            }
        }
    }
}
