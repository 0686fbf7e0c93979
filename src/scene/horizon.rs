//! Event horizon shell
//!
//! A fuzzy sphere of dark voxels. Directions are sampled with
//! `φ = acos(2v − 1)` so the areal density is uniform; drawing φ uniformly
//! would bunch points up at the poles.

use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{
    FieldError, Result, check_finite, check_non_negative, check_radius, check_scale_range,
};
use super::palette::colors;
use crate::consts::*;
use crate::renderer::{InstanceBuffer, InstanceRaw};
use crate::spherical_to_cartesian;

/// One voxel of the shell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShellPoint {
    pub position: Vec3,
    pub scale: f32,
    /// Initial voxel orientation (Euler X, Y)
    pub tilt: Vec2,
}

impl ShellPoint {
    /// Static model matrix within the shell body
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(EulerRot::XYZ, self.tilt.x, self.tilt.y, 0.0),
            self.position,
        )
    }
}

/// Shell generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonConfig {
    pub count: usize,
    pub base_radius: f32,
    /// Extra radial depth; points land in [base, base + jitter]
    pub jitter: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            count: HORIZON_COUNT,
            base_radius: HORIZON_BASE_RADIUS,
            jitter: HORIZON_JITTER,
            min_scale: HORIZON_MIN_SCALE,
            max_scale: HORIZON_MAX_SCALE,
        }
    }
}

impl HorizonConfig {
    pub fn new(count: usize, base_radius: f32, jitter: f32) -> Self {
        Self {
            count,
            base_radius,
            jitter,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(FieldError::EmptyCount { field: "horizon" });
        }
        check_radius("base radius", self.base_radius)?;
        check_non_negative("jitter", self.jitter)?;
        check_finite("outer shell radius", self.base_radius + self.jitter)?;
        check_scale_range(self.min_scale, self.max_scale)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShellPoint {
        let u: f32 = rng.random();
        let v: f32 = rng.random();
        let theta = TAU * u;
        let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
        let r = self.base_radius + rng.random::<f32>() * self.jitter;
        let scale = self.min_scale + rng.random::<f32>() * (self.max_scale - self.min_scale);
        let tilt = Vec2::new(rng.random::<f32>() * PI, rng.random::<f32>() * PI);

        ShellPoint {
            position: spherical_to_cartesian(r, theta, phi),
            scale,
            tilt,
        }
    }
}

/// The generated shell
#[derive(Debug, Clone)]
pub struct HorizonShell {
    config: HorizonConfig,
    points: Vec<ShellPoint>,
}

impl HorizonShell {
    pub fn generate<R: Rng + ?Sized>(config: HorizonConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let points = (0..config.count).map(|_| config.sample(rng)).collect();
        Ok(Self { config, points })
    }

    pub fn config(&self) -> &HorizonConfig {
        &self.config
    }

    pub fn points(&self) -> &[ShellPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Write the static shell instances. Only needed once: the shell moves
    /// as a whole through its body rotation.
    pub fn fill_instances(&self, buffer: &mut InstanceBuffer) {
        for (slot, point) in buffer.as_mut_slice().iter_mut().zip(&self.points) {
            *slot = InstanceRaw::new(point.to_matrix(), colors::HORIZON);
        }
    }
}

/// Sample a shell with default voxel sizes
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    base_radius: f32,
    jitter: f32,
    rng: &mut R,
) -> Result<Vec<ShellPoint>> {
    HorizonShell::generate(HorizonConfig::new(count, base_radius, jitter), rng)
        .map(|shell| shell.points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_points_on_shell() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let points = generate(800, 2.8, 0.4, &mut rng).unwrap();
        assert_eq!(points.len(), 800);
        for p in &points {
            let r = p.position.length();
            assert!(r >= 2.8 - 1e-4 && r <= 3.2 + 1e-4, "radius {r}");
            assert!(p.scale >= 0.3 && p.scale <= 0.5);
        }
    }

    #[test]
    fn test_z_histogram_uniform() {
        // Uniform on a sphere means z/r is uniform on [-1, 1]
        let mut rng = Pcg32::seed_from_u64(99);
        let points = generate(20_000, 1.0, 0.0, &mut rng).unwrap();
        let mut bins = [0usize; 10];
        for p in &points {
            let z = p.position.z / p.position.length();
            let bin = (((z + 1.0) / 2.0) * 10.0) as usize;
            bins[bin.min(9)] += 1;
        }
        for &n in &bins {
            // Expected 2000 per bin; naive φ sampling gives ~1280 in the middle bins
            // and ~4100 at the poles
            assert!((1700..2300).contains(&n), "bins: {bins:?}");
        }
    }

    #[test]
    fn test_validation_errors() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(
            generate(0, 2.8, 0.4, &mut rng),
            Err(FieldError::EmptyCount { field: "horizon" })
        );
        assert!(matches!(
            generate(10, 0.0, 0.4, &mut rng),
            Err(FieldError::InvalidRadius { .. })
        ));
        assert!(matches!(
            generate(10, 2.8, -0.1, &mut rng),
            Err(FieldError::InvalidParameter { field: "jitter", .. })
        ));
        assert!(matches!(
            generate(4, f32::MAX, f32::MAX, &mut rng),
            Err(FieldError::InvalidParameter {
                field: "outer shell radius",
                ..
            })
        ));
    }

    #[test]
    fn test_fill_instances() {
        let mut rng = Pcg32::seed_from_u64(8);
        let shell = HorizonShell::generate(HorizonConfig::new(16, 2.8, 0.4), &mut rng).unwrap();
        let mut buffer = InstanceBuffer::with_len(shell.len());
        shell.fill_instances(&mut buffer);

        for (raw, point) in buffer.as_slice().iter().zip(shell.points()) {
            let model = Mat4::from_cols_array_2d(&raw.model);
            assert!((model.w_axis.truncate() - point.position).length() < 1e-5);
            assert_eq!(raw.color, [0.0, 0.0, 0.0, 1.0]);
        }
    }

    proptest! {
        #[test]
        fn prop_shell_radius_bounds(
            seed in any::<u64>(),
            base in 0.1f32..100.0,
            jitter in 0.0f32..10.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let points = generate(64, base, jitter, &mut rng).unwrap();
            let tolerance = (base + jitter) * 1e-5;
            for p in &points {
                let r = p.position.length();
                prop_assert!(r >= base - tolerance && r <= base + jitter + tolerance);
            }
        }
    }
}
