//! Polar decomposition of square matrices via the singular value decomposition.
//!
//! For a real square matrix `A = U·diag(S)·Vᵀ` the polar factors are
//!
//! - `R = U·Vᵀ`, an orthogonal matrix (the "rotation" part),
//! - `T = V·diag(S)·Vᵀ`, a symmetric positive semi-definite matrix (the
//!   "stretch" part),
//!
//! so that `A = R·T`. This is the usual way to extract a best-fit rotation
//! from a deformation gradient or a cross-covariance matrix.
//!
//! # Modules
//!
//! - \[`polar`\]: [`PolarDecomposer`] and the `polar_svd*` entry points for
//!   fixed 3×3 and dynamic n×n matrices.
//! - \[`rotation`\]: consumers of the polar factor (projection onto SO(3),
//!   rigid point-set alignment).
//! - \[`options`\]: serde-friendly configuration ([`PolarOptions`]).
//! - \[`report`\]: row-major input/report types used by the CLI.
//! - \[`synthetic`\]: deterministic random matrices for tests and benchmarks.
//!
//! # Example
//!
//! ```
//! use nalgebra::Matrix3;
//! use polar_svd::{polar_svd, polar_svd_rt};
//!
//! let a = Matrix3::new(2.0, 0.3, 0.0, -0.1, 1.5, 0.2, 0.0, 0.4, 0.8);
//!
//! // Full decomposition: R, T and the SVD factors.
//! let polar = polar_svd(&a).unwrap();
//! assert!((polar.rotation * polar.stretch - a).norm() < 1e-9);
//!
//! // Rotation and stretch only.
//! let (r, t) = polar_svd_rt(&a).unwrap();
//! assert_eq!(r, polar.rotation);
//! assert_eq!(t, polar.stretch);
//! ```
//!
//! The rotation factor is *not* corrected when `A` is a reflection; see
//! [`PolarDecomposition::flip_reflection`] and [`ReflectionPolicy`].

/// Error type shared by all entry points.
mod error;
/// Type aliases and matrix diagnostics.
mod math;
/// Configuration types.
mod options;
/// Polar decomposition via SVD.
mod polar;
/// Input and report types for the command-line front end.
mod report;
/// Rotation extraction built on the polar factor.
mod rotation;
/// Deterministic synthetic matrices.
///
/// Public so integration tests and downstream benchmarks can draw the same
/// seeded inputs.
pub mod synthetic;

pub use error::*;
pub use math::*;
pub use options::*;
pub use polar::*;
pub use report::*;
pub use rotation::*;
