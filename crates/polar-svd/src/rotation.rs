//! Best-fit rotations from the polar factor.
//!
//! Both helpers request [`ReflectionPolicy::FlipLastColumn`](crate::ReflectionPolicy)
//! so the result is always a proper rotation.

use log::debug;
use nalgebra::{Matrix3, RealField};

use crate::{Mat3, PolarDecomposer, PolarError, PolarOptions, Pt3, Real, Vec3};

/// Project a 3×3 matrix onto SO(3).
///
/// Returns the rotation closest to `m` in the Frobenius norm: the polar
/// factor `U·Vᵀ`, with the last column of `U` negated when that factor would
/// be a reflection.
pub fn closest_rotation<T: RealField + Copy>(m: &Matrix3<T>) -> Result<Matrix3<T>, PolarError> {
    let polar = PolarDecomposer::decompose_with(m, &PolarOptions::proper_rotation())?;
    Ok(polar.rotation)
}

/// Rotation that best maps `src` onto `dst` after removing centroids
/// (Kabsch).
///
/// Minimises `Σ ‖R·(sᵢ − s̄) − (dᵢ − d̄)‖²` over proper rotations `R`.
/// The translation is `d̄ − R·s̄` if the caller needs it.
pub fn best_fit_rotation(src: &[Pt3], dst: &[Pt3]) -> Result<Mat3, PolarError> {
    if src.len() != dst.len() {
        return Err(PolarError::LengthMismatch {
            left: src.len(),
            right: dst.len(),
        });
    }
    if src.len() < 3 {
        return Err(PolarError::NotEnoughPoints(src.len()));
    }

    let n = src.len() as Real;
    let mut c_src = Vec3::zeros();
    let mut c_dst = Vec3::zeros();
    for (ps, pd) in src.iter().zip(dst.iter()) {
        c_src += ps.coords;
        c_dst += pd.coords;
    }
    c_src /= n;
    c_dst /= n;

    // Cross-covariance H = Σ (d − d̄)(s − s̄)ᵀ; its polar factor is the answer.
    let mut h = Mat3::zeros();
    for (ps, pd) in src.iter().zip(dst.iter()) {
        let ds = ps.coords - c_src;
        let dd = pd.coords - c_dst;
        h += dd * ds.transpose();
    }

    let polar = PolarDecomposer::decompose_with(&h, &PolarOptions::proper_rotation())?;
    if polar.singular_values[1] <= Real::EPSILON * polar.singular_values[0] {
        debug!("point sets are (nearly) collinear; rotation about their axis is arbitrary");
    }
    Ok(polar.rotation)
}
