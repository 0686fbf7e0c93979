//! Accretion disk particle field
//!
//! The disk is a fixed array of orbit descriptors sampled once at startup.
//! Radii are drawn as `inner + U1·U2·spread`, which piles particles up
//! against the inner edge and thins them out toward the rim.

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{
    FieldError, Result, check_finite, check_non_negative, check_radius, check_scale_range,
};
use super::palette::Palette;
use crate::consts::*;

/// One orbiting voxel of the accretion disk (immutable after generation)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleDescriptor {
    /// Initial orbital phase (radians, [0, 2π))
    pub angle: f32,
    /// Orbital radius
    pub radius: f32,
    /// Rest height above/below the disk plane
    pub y_offset: f32,
    /// Orbital speed (radians/s), faster near the center
    pub angular_speed: f32,
    /// Voxel size
    pub scale: f32,
    /// Index into the field palette
    pub color_id: usize,
}

/// Accretion disk generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskConfig {
    pub count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Vertical spread as a fraction of radius
    pub thickness: f32,
    pub base_speed: f32,
    pub speed_factor: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub palette: Palette,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            count: DISK_COUNT,
            inner_radius: DISK_INNER_RADIUS,
            outer_radius: DISK_OUTER_RADIUS,
            thickness: DISK_THICKNESS,
            base_speed: DISK_BASE_SPEED,
            speed_factor: DISK_SPEED_FACTOR,
            min_scale: DISK_MIN_SCALE,
            max_scale: DISK_MAX_SCALE,
            palette: Palette::accretion(),
        }
    }
}

impl DiskConfig {
    /// Config with default tuning and the given shape
    pub fn new(count: usize, inner_radius: f32, outer_radius: f32, palette: Palette) -> Self {
        Self {
            count,
            inner_radius,
            outer_radius,
            palette,
            ..Self::default()
        }
    }

    /// Width of the radial band
    pub fn spread(&self) -> f32 {
        self.outer_radius - self.inner_radius
    }

    /// Reject configurations that would yield empty, NaN or infinite fields
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(FieldError::EmptyCount { field: "disk" });
        }
        check_radius("inner radius", self.inner_radius)?;
        if !self.outer_radius.is_finite() || self.outer_radius < self.inner_radius {
            return Err(FieldError::InvertedRadii {
                inner: self.inner_radius,
                outer: self.outer_radius,
            });
        }
        check_non_negative("thickness", self.thickness)?;
        check_non_negative("base speed", self.base_speed)?;
        check_non_negative("speed factor", self.speed_factor)?;
        check_scale_range(self.min_scale, self.max_scale)?;
        // Each field can be finite while the derived values overflow
        check_finite(
            "inner angular speed",
            self.base_speed + self.speed_factor / self.inner_radius,
        )?;
        check_finite("vertical spread", self.outer_radius * self.thickness)?;
        if self.palette.is_empty() {
            return Err(FieldError::EmptyPalette);
        }
        Ok(())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticleDescriptor {
        let angle = rng.random_range(0.0..TAU);
        let u1: f32 = rng.random();
        let u2: f32 = rng.random();
        let radius = (self.inner_radius + u1 * u2 * self.spread()).min(self.outer_radius);
        let y_offset = (rng.random::<f32>() - 0.5) * radius * self.thickness;
        let angular_speed = self.base_speed + self.speed_factor / radius;
        let scale = self.min_scale + rng.random::<f32>() * (self.max_scale - self.min_scale);
        let color_id = rng.random_range(0..self.palette.len());

        ParticleDescriptor {
            angle,
            radius,
            y_offset,
            angular_speed,
            scale,
            color_id,
        }
    }
}

/// The generated disk: config plus its immutable descriptors
#[derive(Debug, Clone)]
pub struct DiskField {
    config: DiskConfig,
    particles: Vec<ParticleDescriptor>,
}

impl DiskField {
    /// Validate `config` and sample `config.count` descriptors
    pub fn generate<R: Rng + ?Sized>(config: DiskConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let particles = (0..config.count).map(|_| config.sample(rng)).collect();
        Ok(Self { config, particles })
    }

    pub fn config(&self) -> &DiskConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.config.palette
    }

    pub fn particles(&self) -> &[ParticleDescriptor] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Sample a disk with default tuning
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    inner_radius: f32,
    outer_radius: f32,
    palette: &Palette,
    rng: &mut R,
) -> Result<Vec<ParticleDescriptor>> {
    let config = DiskConfig::new(count, inner_radius, outer_radius, palette.clone());
    DiskField::generate(config, rng).map(|field| field.particles)
}
