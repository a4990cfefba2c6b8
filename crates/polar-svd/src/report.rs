//! Row-major input and JSON report for a single decomposition.

use serde::{Deserialize, Serialize};

use crate::{
    dmatrix_to_rows, frobenius_distance, orthogonality_error, rows_to_dmatrix, symmetry_error,
    Mat3, PolarDecomposer, PolarDecompositionDyn, PolarError, PolarOptions, Real,
    ReflectionPolicy,
};

/// A square matrix given as row-major nested arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarInput {
    /// Rows of the matrix; every row must have as many entries as there are rows.
    pub matrix: Vec<Vec<Real>>,
}

/// Polar factors, SVD factors, and accuracy diagnostics of one input.
///
/// All matrices are row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarReport {
    /// Matrix dimension `n`.
    pub dim: usize,
    /// Orthogonal factor `R`.
    pub rotation: Vec<Vec<Real>>,
    /// Symmetric positive semi-definite factor `T`.
    pub stretch: Vec<Vec<Real>>,
    /// Left singular vectors `U`, after any reflection correction.
    pub u: Vec<Vec<Real>>,
    /// Singular values `S` in descending order.
    pub singular_values: Vec<Real>,
    /// Right singular vectors `V` (not `Vᵀ`).
    pub v: Vec<Vec<Real>>,
    /// `det(R)` of the returned rotation factor.
    pub rotation_determinant: Real,
    /// `U·Vᵀ` was a reflection before any correction.
    pub reflection: bool,
    /// The reflection policy flipped the last column of `U`.
    pub reflection_corrected: bool,
    /// `‖A − R·T‖_F`.
    pub reconstruction_error: Real,
    /// `‖RᵀR − I‖_F`.
    pub orthogonality_error: Real,
    /// `‖T − Tᵀ‖_F`.
    pub symmetry_error: Real,
}

/// Decompose `input.matrix` and summarise the result.
///
/// 3×3 input uses the fixed-size path, anything else the dynamic one.
pub fn run_polar(input: &PolarInput, options: &PolarOptions) -> Result<PolarReport, PolarError> {
    let a = rows_to_dmatrix(&input.matrix)?;

    // Decompose without correction first so the report can tell whether the
    // raw factor was a reflection.
    let raw = PolarOptions {
        reflection: ReflectionPolicy::Keep,
        ..*options
    };
    let mut polar: PolarDecompositionDyn<Real> = if a.nrows() == 3 {
        let a3 = Mat3::from_fn(|r, c| a[(r, c)]);
        PolarDecomposer::decompose_with(&a3, &raw)?.into()
    } else {
        PolarDecomposer::decompose_dyn_with(&a, &raw)?
    };

    let reflection = polar.is_reflection();
    let reflection_corrected =
        options.reflection == ReflectionPolicy::FlipLastColumn && polar.flip_reflection();

    Ok(PolarReport {
        dim: polar.dim(),
        rotation_determinant: polar.rotation.determinant(),
        reflection,
        reflection_corrected,
        reconstruction_error: frobenius_distance(&a, &polar.reconstruct()),
        orthogonality_error: orthogonality_error(&polar.rotation),
        symmetry_error: symmetry_error(&polar.stretch),
        rotation: dmatrix_to_rows(&polar.rotation),
        stretch: dmatrix_to_rows(&polar.stretch),
        u: dmatrix_to_rows(&polar.u),
        singular_values: polar.singular_values.iter().copied().collect(),
        v: dmatrix_to_rows(&polar.v),
    })
}
