//! Distant background stars
//!
//! A thick shell of grey point sprites far outside everything else. Each
//! star steps the radius inward by a random fraction of `depth / count`, so
//! the shell is filled from the outside in and never leaves
//! `[radius, radius + depth]`.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{FieldError, Result, check_finite, check_non_negative, check_radius};
use super::palette::Color;
use crate::consts::*;
use crate::spherical_to_cartesian;

/// Star field parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarConfig {
    pub count: usize,
    /// Inner radius of the shell
    pub radius: f32,
    /// Shell thickness
    pub depth: f32,
    /// Sprite size multiplier; sizes land in [factor / 2, factor]
    pub factor: f32,
    /// Grey level of every star
    pub lightness: f32,
    /// Twinkle rate (radians/s)
    pub speed: f32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: STARS_COUNT,
            radius: STARS_RADIUS,
            depth: STARS_DEPTH,
            factor: STARS_FACTOR,
            lightness: STARS_LIGHTNESS,
            speed: STARS_TWINKLE_SPEED,
        }
    }
}

impl StarConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(FieldError::EmptyCount { field: "star" });
        }
        check_radius("star radius", self.radius)?;
        check_non_negative("star depth", self.depth)?;
        check_finite("outer star radius", self.radius + self.depth)?;
        check_non_negative("star factor", self.factor)?;
        check_non_negative("star lightness", self.lightness)?;
        check_non_negative("twinkle speed", self.speed)
    }
}

/// Generated stars: parallel position, color and size arrays
#[derive(Debug, Clone)]
pub struct StarField {
    config: StarConfig,
    positions: Vec<Vec3>,
    colors: Vec<Color>,
    sizes: Vec<f32>,
}

impl StarField {
    pub fn generate<R: Rng + ?Sized>(config: StarConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let step = config.depth / config.count as f32;
        let mut r = config.radius + config.depth;
        let mut positions = Vec::with_capacity(config.count);
        let mut sizes = Vec::with_capacity(config.count);

        for _ in 0..config.count {
            r = (r - step * rng.random::<f32>()).max(config.radius);
            let phi = (1.0 - 2.0 * rng.random::<f32>()).clamp(-1.0, 1.0).acos();
            let theta = TAU * rng.random::<f32>();
            positions.push(spherical_to_cartesian(r, theta, phi));
            sizes.push((0.5 + 0.5 * rng.random::<f32>()) * config.factor);
        }

        // Zero saturation: every star is the same grey
        let colors = vec![Vec3::splat(config.lightness); config.count];

        Ok(Self {
            config,
            positions,
            colors,
            sizes,
        })
    }

    pub fn config(&self) -> &StarConfig {
        &self.config
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Sprite size multiplier at elapsed time `t`, in [2, 4]
    pub fn twinkle(&self, t: f32) -> f32 {
        3.0 + (t * self.config.speed + 100.0).sin()
    }

    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn color_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_shell() {
        let mut rng = Pcg32::seed_from_u64(77);
        let stars = StarField::generate(StarConfig::default(), &mut rng).unwrap();
        assert_eq!(stars.len(), 3000);
        assert_eq!(stars.sizes().len(), 3000);
        assert_eq!(stars.color_floats().len(), 9000);

        for (p, &size) in stars.positions().iter().zip(stars.sizes()) {
            let r = p.length();
            assert!(r >= 200.0 - 1e-2 && r <= 250.0 + 1e-2, "radius {r}");
            assert!((2.0..=4.0).contains(&size));
        }
        // Radii only ever step inward
        let radii: Vec<f32> = stars.positions().iter().map(|p| p.length()).collect();
        assert!(radii.windows(2).all(|w| w[1] <= w[0] + 1e-2));
        assert!(stars.color_floats().iter().all(|&c| c == STARS_LIGHTNESS));
    }

    #[test]
    fn test_twinkle_range() {
        let mut rng = Pcg32::seed_from_u64(3);
        let stars = StarField::generate(
            StarConfig {
                count: 10,
                ..StarConfig::default()
            },
            &mut rng,
        )
        .unwrap();
        for i in 0..200 {
            let k = stars.twinkle(i as f32 * 0.37);
            assert!((2.0..=4.0).contains(&k));
        }
    }

    #[test]
    fn test_validation() {
        let mut rng = Pcg32::seed_from_u64(1);
        let empty = StarConfig {
            count: 0,
            ..StarConfig::default()
        };
        assert_eq!(
            StarField::generate(empty, &mut rng).err(),
            Some(FieldError::EmptyCount { field: "star" })
        );
        let overflowing = StarConfig {
            radius: f32::MAX,
            depth: f32::MAX,
            ..StarConfig::default()
        };
        assert!(matches!(
            StarField::generate(overflowing, &mut rng),
            Err(FieldError::InvalidParameter {
                field: "outer star radius",
                ..
            })
        ));
    }
}
