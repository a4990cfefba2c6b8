//! Configuration for [`PolarDecomposer`](crate::PolarDecomposer).
//!
//! All types are serde-friendly and every field has a default, so a JSON
//! config only needs to name what it changes:
//!
//! ```
//! use polar_svd::{PolarOptions, ReflectionPolicy};
//!
//! let opts: PolarOptions = serde_json::from_str(r#"{"reflection": "flip_last_column"}"#).unwrap();
//! assert_eq!(opts.reflection, ReflectionPolicy::FlipLastColumn);
//! assert_eq!(opts.svd.max_iters, 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::Real;

/// Convergence controls forwarded to nalgebra's SVD.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SvdOptions {
    /// Convergence tolerance. `None` uses the scalar type's machine epsilon.
    #[serde(default)]
    pub eps: Option<Real>,
    /// Maximum number of iterations; `0` means no limit.
    #[serde(default)]
    pub max_iters: usize,
}

/// What to do when `R = U·Vᵀ` comes out as a reflection (`det(R) < 0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflectionPolicy {
    /// Return `U·Vᵀ` as computed, whatever its determinant.
    #[default]
    Keep,
    /// Negate the last column of `U` and rebuild `R = U·Vᵀ`.
    ///
    /// The result is a proper rotation, but `R·T` no longer reproduces an
    /// input with `det < 0`.
    FlipLastColumn,
}

/// Options for a single decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarOptions {
    /// SVD convergence controls.
    #[serde(default)]
    pub svd: SvdOptions,
    /// Reflection handling for the rotation factor.
    #[serde(default)]
    pub reflection: ReflectionPolicy,
}

impl PolarOptions {
    /// Options that always yield a proper rotation (`det(R) = +1`).
    pub fn proper_rotation() -> Self {
        Self {
            reflection: ReflectionPolicy::FlipLastColumn,
            ..Self::default()
        }
    }
}
