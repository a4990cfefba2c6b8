//! Polar decomposition `A = R·T` from the singular value decomposition.
//!
//! With `A = U·diag(S)·Vᵀ`:
//!
//! - `R = U·Vᵀ` is orthogonal,
//! - `T = V·diag(S)·Vᵀ` is symmetric positive semi-definite.
//!
//! 3×3 input goes through nalgebra's specialised 3×3 SVD after dividing by its
//! largest absolute entry; dynamic input, and 3×3 input with a finite
//! iteration budget, through the general bidiagonalisation + implicit QR
//! routine. Both are total over finite square matrices: rank-deficient and zero matrices produce zero
//! singular values and a singular `T`, never an error.
//!
//! # Reflections
//!
//! When `det(A) < 0` the factor `U·Vᵀ` has determinant `-1`. It is returned
//! as is. Callers that need a proper rotation flip the last column of `U` and
//! rebuild `R`:
//!
//! ```
//! use nalgebra::Matrix3;
//! use polar_svd::polar_svd;
//!
//! let a = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0);
//! let mut polar = polar_svd(&a).unwrap();
//! if polar.rotation.determinant() < 0.0 {
//!     polar.u.column_mut(2).neg_mut();
//!     polar.rotation = polar.u * polar.v.transpose();
//! }
//! assert!(polar.rotation.determinant() > 0.0);
//! ```
//!
//! [`PolarDecomposition::flip_reflection`] and
//! [`ReflectionPolicy::FlipLastColumn`] do exactly this.

use log::debug;
use nalgebra::{DMatrix, DVector, Matrix3, RealField, Vector3};

use crate::{PolarError, PolarOptions, ReflectionPolicy, Real};

/// Polar factors of a 3×3 matrix together with the SVD they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarDecomposition<T: RealField> {
    /// Orthogonal factor `R = U·Vᵀ`.
    pub rotation: Matrix3<T>,
    /// Symmetric positive semi-definite factor `T = V·diag(S)·Vᵀ`.
    pub stretch: Matrix3<T>,
    /// Left singular vectors.
    pub u: Matrix3<T>,
    /// Non-negative singular values, in the order nalgebra returns them
    /// (descending).
    pub singular_values: Vector3<T>,
    /// Right singular vectors (`V`, not `Vᵀ`).
    pub v: Matrix3<T>,
}

/// Polar factors of an n×n matrix together with the SVD they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarDecompositionDyn<T: RealField> {
    /// Orthogonal factor `R = U·Vᵀ`.
    pub rotation: DMatrix<T>,
    /// Symmetric positive semi-definite factor `T = V·diag(S)·Vᵀ`.
    pub stretch: DMatrix<T>,
    /// Left singular vectors.
    pub u: DMatrix<T>,
    /// Non-negative singular values (descending).
    pub singular_values: DVector<T>,
    /// Right singular vectors (`V`, not `Vᵀ`).
    pub v: DMatrix<T>,
}

/// SVD-based polar decomposition.
///
/// Every entry point has a free-function twin (`polar_svd*`).
#[derive(Debug, Clone, Copy)]
pub struct PolarDecomposer;

/// Full polar decomposition of a 3×3 matrix: `R`, `T`, `U`, `S`, `V`.
pub fn polar_svd<T: RealField + Copy>(
    a: &Matrix3<T>,
) -> Result<PolarDecomposition<T>, PolarError> {
    PolarDecomposer::decompose(a)
}

/// [`polar_svd`] with explicit options.
pub fn polar_svd_with<T: RealField + Copy>(
    a: &Matrix3<T>,
    options: &PolarOptions,
) -> Result<PolarDecomposition<T>, PolarError> {
    PolarDecomposer::decompose_with(a, options)
}

/// Rotation and stretch factors `(R, T)` of a 3×3 matrix.
pub fn polar_svd_rt<T: RealField + Copy>(
    a: &Matrix3<T>,
) -> Result<(Matrix3<T>, Matrix3<T>), PolarError> {
    PolarDecomposer::rotation_and_stretch(a)
}

/// Full polar decomposition of an n×n matrix.
pub fn polar_svd_dyn<T: RealField + Copy>(
    a: &DMatrix<T>,
) -> Result<PolarDecompositionDyn<T>, PolarError> {
    PolarDecomposer::decompose_dyn(a)
}

/// [`polar_svd_dyn`] with explicit options.
pub fn polar_svd_dyn_with<T: RealField + Copy>(
    a: &DMatrix<T>,
    options: &PolarOptions,
) -> Result<PolarDecompositionDyn<T>, PolarError> {
    PolarDecomposer::decompose_dyn_with(a, options)
}

/// Rotation and stretch factors `(R, T)` of an n×n matrix.
pub fn polar_svd_dyn_rt<T: RealField + Copy>(
    a: &DMatrix<T>,
) -> Result<(DMatrix<T>, DMatrix<T>), PolarError> {
    PolarDecomposer::rotation_and_stretch_dyn(a)
}

impl PolarDecomposer {
    /// Decompose a 3×3 matrix with default options.
    pub fn decompose<T: RealField + Copy>(
        a: &Matrix3<T>,
    ) -> Result<PolarDecomposition<T>, PolarError> {
        Self::decompose_with(a, &PolarOptions::default())
    }

    /// Decompose a 3×3 matrix.
    ///
    /// Computes `A = U·diag(S)·Vᵀ`, then `R = U·Vᵀ` and `T = V·diag(S)·Vᵀ`.
    /// The reflection policy in `options` is applied last.
    pub fn decompose_with<T: RealField + Copy>(
        a: &Matrix3<T>,
        options: &PolarOptions,
    ) -> Result<PolarDecomposition<T>, PolarError> {
        ensure_finite(a.iter())?;

        let (u, singular_values, v_t) = svd3(a, options)?;
        let v = v_t.transpose();

        let mut polar = PolarDecomposition {
            rotation: u * v_t,
            stretch: v * Matrix3::from_diagonal(&singular_values) * v_t,
            u,
            singular_values,
            v,
        };
        log_factors(polar.singular_values.as_slice(), polar.is_reflection());
        if options.reflection == ReflectionPolicy::FlipLastColumn {
            polar.flip_reflection();
        }
        Ok(polar)
    }

    /// Only the `(R, T)` factors of a 3×3 matrix.
    ///
    /// Runs the full decomposition and drops `U`, `S`, `V`, so the factors
    /// are bit-identical to those of [`PolarDecomposer::decompose`].
    pub fn rotation_and_stretch<T: RealField + Copy>(
        a: &Matrix3<T>,
    ) -> Result<(Matrix3<T>, Matrix3<T>), PolarError> {
        Self::decompose(a).map(PolarDecomposition::into_rotation_and_stretch)
    }

    /// Decompose an n×n matrix with default options.
    pub fn decompose_dyn<T: RealField + Copy>(
        a: &DMatrix<T>,
    ) -> Result<PolarDecompositionDyn<T>, PolarError> {
        Self::decompose_dyn_with(a, &PolarOptions::default())
    }

    /// Decompose an n×n matrix.
    ///
    /// Same algorithm as [`PolarDecomposer::decompose_with`]; additionally
    /// rejects empty and non-square input.
    pub fn decompose_dyn_with<T: RealField + Copy>(
        a: &DMatrix<T>,
        options: &PolarOptions,
    ) -> Result<PolarDecompositionDyn<T>, PolarError> {
        if a.is_empty() {
            return Err(PolarError::Empty);
        }
        if !a.is_square() {
            return Err(PolarError::NotSquare {
                rows: a.nrows(),
                cols: a.ncols(),
            });
        }
        ensure_finite(a.iter())?;

        let max_iters = options.svd.max_iters;
        let svd = a
            .clone_owned()
            .try_svd(true, true, svd_eps::<T>(options), max_iters)
            .ok_or(PolarError::NoConvergence { max_iters })?;
        let u = svd.u.ok_or(PolarError::SvdFailed)?;
        let v_t = svd.v_t.ok_or(PolarError::SvdFailed)?;
        let singular_values = svd.singular_values;
        let v = v_t.transpose();

        let mut polar = PolarDecompositionDyn {
            rotation: &u * &v_t,
            stretch: &v * DMatrix::from_diagonal(&singular_values) * &v_t,
            u,
            singular_values,
            v,
        };
        log_factors(polar.singular_values.as_slice(), polar.is_reflection());
        if options.reflection == ReflectionPolicy::FlipLastColumn {
            polar.flip_reflection();
        }
        Ok(polar)
    }

    /// Only the `(R, T)` factors of an n×n matrix.
    pub fn rotation_and_stretch_dyn<T: RealField + Copy>(
        a: &DMatrix<T>,
    ) -> Result<(DMatrix<T>, DMatrix<T>), PolarError> {
        Self::decompose_dyn(a).map(PolarDecompositionDyn::into_rotation_and_stretch)
    }
}

impl<T: RealField + Copy> PolarDecomposition<T> {
    /// `true` if the rotation factor is improper (`det(R) < 0`).
    pub fn is_reflection(&self) -> bool {
        self.rotation.determinant() < T::zero()
    }

    /// Turn an improper rotation factor into a proper one.
    ///
    /// Negates the last column of `U` and rebuilds `R = U·Vᵀ`; `T`, `S` and
    /// `V` are unchanged. Returns `false` (and does nothing) if `R` already
    /// has a non-negative determinant.
    ///
    /// After a flip `R·T` no longer equals the input: the residual
    /// `‖A − R·T‖_F` is twice the smallest singular value.
    pub fn flip_reflection(&mut self) -> bool {
        if !self.is_reflection() {
            return false;
        }
        self.u.column_mut(2).neg_mut();
        self.rotation = self.u * self.v.transpose();
        debug!("flipped last column of U to make the polar factor a proper rotation");
        true
    }

    /// `R·T`.
    pub fn reconstruct(&self) -> Matrix3<T> {
        self.rotation * self.stretch
    }

    /// `U·diag(S)·Vᵀ`.
    pub fn reconstruct_svd(&self) -> Matrix3<T> {
        self.u * Matrix3::from_diagonal(&self.singular_values) * self.v.transpose()
    }

    /// Drop the SVD factors and keep `(R, T)`.
    pub fn into_rotation_and_stretch(self) -> (Matrix3<T>, Matrix3<T>) {
        (self.rotation, self.stretch)
    }
}

impl<T: RealField + Copy> PolarDecompositionDyn<T> {
    /// Matrix dimension `n`.
    pub fn dim(&self) -> usize {
        self.rotation.nrows()
    }

    /// `true` if the rotation factor is improper (`det(R) < 0`).
    pub fn is_reflection(&self) -> bool {
        self.rotation.determinant() < T::zero()
    }

    /// See [`PolarDecomposition::flip_reflection`].
    pub fn flip_reflection(&mut self) -> bool {
        if !self.is_reflection() {
            return false;
        }
        let last = self.u.ncols() - 1;
        self.u.column_mut(last).neg_mut();
        self.rotation = &self.u * self.v.transpose();
        debug!("flipped last column of U to make the polar factor a proper rotation");
        true
    }

    /// `R·T`.
    pub fn reconstruct(&self) -> DMatrix<T> {
        &self.rotation * &self.stretch
    }

    /// `U·diag(S)·Vᵀ`.
    pub fn reconstruct_svd(&self) -> DMatrix<T> {
        &self.u * DMatrix::from_diagonal(&self.singular_values) * self.v.transpose()
    }

    /// Drop the SVD factors and keep `(R, T)`.
    pub fn into_rotation_and_stretch(self) -> (DMatrix<T>, DMatrix<T>) {
        (self.rotation, self.stretch)
    }
}

impl<T: RealField + Copy> From<PolarDecomposition<T>> for PolarDecompositionDyn<T> {
    fn from(p: PolarDecomposition<T>) -> Self {
        Self {
            rotation: DMatrix::from_column_slice(3, 3, p.rotation.as_slice()),
            stretch: DMatrix::from_column_slice(3, 3, p.stretch.as_slice()),
            u: DMatrix::from_column_slice(3, 3, p.u.as_slice()),
            singular_values: DVector::from_vec(p.singular_values.iter().copied().collect()),
            v: DMatrix::from_column_slice(3, 3, p.v.as_slice()),
        }
    }
}

fn ensure_finite<'a, T: RealField + Copy>(
    mut entries: impl Iterator<Item = &'a T>,
) -> Result<(), PolarError> {
    if entries.all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(PolarError::NonFinite)
    }
}

/// `(U, S, Vᵀ)` of a 3×3 matrix.
///
/// nalgebra's 3×3 routine forms `AᵀA`, so the input is divided by its largest
/// absolute entry first and `S` is scaled back afterwards. That routine cannot
/// report an exhausted iteration budget, so a finite `max_iters` goes through
/// the general routine instead.
fn svd3<T: RealField + Copy>(
    a: &Matrix3<T>,
    options: &PolarOptions,
) -> Result<(Matrix3<T>, Vector3<T>, Matrix3<T>), PolarError> {
    let scale = a.camax();
    let scaled = if scale > T::zero() { a / scale } else { *a };
    let eps = svd_eps::<T>(options);
    let max_iters = options.svd.max_iters;

    let (u, mut singular_values, v_t) = if max_iters == 0 {
        let svd = scaled.try_svd(true, true, eps, 0).ok_or(PolarError::SvdFailed)?;
        let u = svd.u.ok_or(PolarError::SvdFailed)?;
        let v_t = svd.v_t.ok_or(PolarError::SvdFailed)?;
        (u, svd.singular_values, v_t)
    } else {
        let svd = DMatrix::from_column_slice(3, 3, scaled.as_slice())
            .try_svd(true, true, eps, max_iters)
            .ok_or(PolarError::NoConvergence { max_iters })?;
        let u = svd.u.ok_or(PolarError::SvdFailed)?;
        let v_t = svd.v_t.ok_or(PolarError::SvdFailed)?;
        (
            Matrix3::from_column_slice(u.as_slice()),
            Vector3::from_column_slice(svd.singular_values.as_slice()),
            Matrix3::from_column_slice(v_t.as_slice()),
        )
    };

    if scale > T::zero() {
        singular_values *= scale;
    }
    Ok((u, singular_values, v_t))
}

fn svd_eps<T: RealField + Copy>(options: &PolarOptions) -> T {
    options
        .svd
        .eps
        .map(nalgebra::convert::<Real, T>)
        .unwrap_or_else(T::default_epsilon)
}

fn log_factors<T: RealField + Copy>(singular_values: &[T], reflection: bool) {
    if reflection {
        debug!("polar factor U·Vᵀ is a reflection (det < 0)");
    }
    let Some(&first) = singular_values.first() else {
        return;
    };
    let (lo, hi) = singular_values
        .iter()
        .fold((first, first), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    if lo <= hi * T::default_epsilon() {
        debug!(
            "rank-deficient input: smallest singular value {:?}, largest {:?}",
            lo, hi
        );
    }
}
