//! Seeded random matrices for tests and benchmarks.
//!
//! Every sampler is driven by a [`StdRng`] seeded from a `u64`, so a given
//! seed reproduces the same sequence of matrices within one `rand` version.

use nalgebra::Rotation3;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{DMat, Mat3, Real, Vec3};

/// Deterministic source of test matrices.
#[derive(Debug, Clone)]
pub struct MatrixSampler {
    rng: StdRng,
}

impl MatrixSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// General 3×3 matrix with entries uniform in `[-1, 1)`.
    pub fn matrix3(&mut self) -> Mat3 {
        let rng = &mut self.rng;
        Mat3::from_fn(|_, _| rng.random_range(-1.0..1.0))
    }

    /// Rotation from Euler angles uniform in `[-π, π)`.
    pub fn rotation3(&mut self) -> Mat3 {
        let pi = std::f64::consts::PI;
        let roll = self.rng.random_range(-pi..pi);
        let pitch = self.rng.random_range(-pi..pi);
        let yaw = self.rng.random_range(-pi..pi);
        Rotation3::from_euler_angles(roll, pitch, yaw).into_inner()
    }

    /// Symmetric positive definite matrix `Q·diag(s)·Qᵀ` with `s` in
    /// `[min_scale, max_scale)`.
    pub fn stretch3(&mut self, min_scale: Real, max_scale: Real) -> Mat3 {
        let q = self.rotation3();
        let s = Vec3::from_fn(|_, _| self.rng.random_range(min_scale..max_scale));
        q * Mat3::from_diagonal(&s) * q.transpose()
    }

    /// Rotation composed with a mirror, so `det = -1`.
    pub fn reflection3(&mut self) -> Mat3 {
        self.rotation3() * Mat3::from_diagonal(&Vec3::new(1.0, 1.0, -1.0))
    }

    /// General n×n matrix with entries uniform in `[-1, 1)`.
    pub fn square(&mut self, n: usize) -> DMat {
        let rng = &mut self.rng;
        DMat::from_fn(n, n, |_, _| rng.random_range(-1.0..1.0))
    }
}
