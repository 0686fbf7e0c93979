//! Background spiral galaxy
//!
//! A static point cloud drawn behind the black hole. Points sit on
//! `branches` twisted arms, scattered by `U^power` so most stay
//! close to their arm, and fade from a hot core color to cool arm tips.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{FieldError, Result, check_finite, check_non_negative, check_radius};
use super::palette::{Color, colors};
use crate::consts::*;

/// Galaxy generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalaxyConfig {
    pub count: usize,
    pub radius: f32,
    pub branches: u32,
    /// Arm twist (radians per unit radius)
    pub spin: f32,
    /// Scatter as a fraction of radius
    pub randomness: f32,
    /// Scatter falloff exponent; higher keeps points tighter to the arm
    pub randomness_power: f32,
    pub inside_color: Color,
    pub outside_color: Color,
    /// Point sprite size hint for the host
    pub point_size: f32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            count: GALAXY_COUNT,
            radius: GALAXY_RADIUS,
            branches: GALAXY_BRANCHES,
            spin: GALAXY_SPIN,
            randomness: GALAXY_RANDOMNESS,
            randomness_power: GALAXY_RANDOMNESS_POWER,
            inside_color: colors::GALAXY_INSIDE,
            outside_color: colors::GALAXY_OUTSIDE,
            point_size: GALAXY_POINT_SIZE,
        }
    }
}

impl GalaxyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(FieldError::EmptyCount { field: "galaxy" });
        }
        if self.branches == 0 {
            return Err(FieldError::EmptyCount { field: "galaxy branch" });
        }
        check_radius("galaxy radius", self.radius)?;
        if !self.spin.is_finite() {
            return Err(FieldError::InvalidParameter {
                field: "spin",
                value: self.spin,
            });
        }
        check_non_negative("randomness", self.randomness)?;
        check_non_negative("randomness power", self.randomness_power)?;
        check_finite("arm twist", self.radius * self.spin)?;
        check_finite("scatter", self.radius * self.randomness)?;
        check_non_negative("point size", self.point_size)
    }

    /// Signed scatter `U^power · ±1 · randomness · r`
    fn scatter<R: Rng + ?Sized>(&self, rng: &mut R, r: f32) -> f32 {
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        rng.random::<f32>().powf(self.randomness_power) * sign * self.randomness * r
    }
}

/// Generated galaxy: parallel position and color arrays
#[derive(Debug, Clone)]
pub struct GalaxyField {
    config: GalaxyConfig,
    positions: Vec<Vec3>,
    colors: Vec<Color>,
}

impl GalaxyField {
    pub fn generate<R: Rng + ?Sized>(config: GalaxyConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let mut positions = Vec::with_capacity(config.count);
        let mut colors = Vec::with_capacity(config.count);

        for i in 0..config.count {
            let r = rng.random::<f32>() * config.radius;
            let spin_angle = r * config.spin;
            let branch_angle = (i as u32 % config.branches) as f32 / config.branches as f32 * TAU;

            let offset = Vec3::new(
                config.scatter(rng, r),
                // Flatter in Y
                config.scatter(rng, r) * 0.5,
                config.scatter(rng, r),
            );
            let angle = branch_angle + spin_angle;
            positions.push(Vec3::new(angle.cos() * r, 0.0, angle.sin() * r) + offset);
            colors.push(config.inside_color.lerp(config.outside_color, r / config.radius));
        }

        Ok(Self {
            config,
            positions,
            colors,
        })
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat xyz triples for a vertex attribute upload
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Flat rgb triples for a vertex attribute upload
    pub fn color_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}
