//! The assembled voxel black hole
//!
//! Owns every generated field and the instance buffers fed to the renderer.
//! All allocation happens in [`VoxelScene::new`]; [`VoxelScene::frame`] only
//! overwrites buffers in place.

use glam::{EulerRot, Mat4, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::BodyRotation;
use super::clock::AnimationClock;
use super::disk::{DiskConfig, DiskField};
use super::error::Result;
use super::galaxy::{GalaxyConfig, GalaxyField};
use super::horizon::{HorizonConfig, HorizonShell};
use super::palette::{Color, colors};
use super::stars::{StarConfig, StarField};
use super::update::{AnimationParams, update_disk};
use crate::Settings;
use crate::consts::*;
use crate::renderer::InstanceBuffer;

/// Everything needed to draw one frame of the scene
#[derive(Debug, Clone)]
pub struct VoxelScene {
    /// Seed the fields were generated from
    seed: u64,
    disk: DiskField,
    horizon: HorizonShell,
    galaxy: Option<GalaxyField>,
    stars: StarField,
    clock: AnimationClock,
    params: AnimationParams,
    horizon_body: BodyRotation,
    galaxy_body: BodyRotation,
    disk_instances: InstanceBuffer,
    horizon_instances: InstanceBuffer,
}

impl VoxelScene {
    /// Build the scene described by `settings`. Without a seed a fresh one is
    /// drawn (and logged, so a run can be reproduced).
    pub fn new(settings: &Settings, seed: Option<u64>) -> Result<Self> {
        Self::with_configs(
            DiskConfig::default(),
            HorizonConfig::default(),
            settings.galaxy_config(),
            settings.star_config(),
            settings.animation_params(),
            seed,
        )
    }

    pub fn with_configs(
        disk: DiskConfig,
        horizon: HorizonConfig,
        galaxy: Option<GalaxyConfig>,
        stars: StarConfig,
        params: AnimationParams,
        seed: Option<u64>,
    ) -> Result<Self> {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);

        let disk = DiskField::generate(disk, &mut rng)?;
        let horizon = HorizonShell::generate(horizon, &mut rng)?;
        let galaxy = galaxy
            .map(|config| GalaxyField::generate(config, &mut rng))
            .transpose()?;
        let stars = StarField::generate(stars, &mut rng)?;

        let disk_instances = InstanceBuffer::with_len(disk.len());
        let mut horizon_instances = InstanceBuffer::with_len(horizon.len());
        horizon.fill_instances(&mut horizon_instances);

        log::info!(
            "Scene generated with seed {}: {} disk voxels, {} horizon voxels, {} galaxy points, {} stars",
            seed,
            disk.len(),
            horizon.len(),
            galaxy.as_ref().map_or(0, GalaxyField::len),
            stars.len()
        );

        let mut scene = Self {
            seed,
            disk,
            horizon,
            galaxy,
            stars,
            clock: AnimationClock::new(),
            params,
            horizon_body: BodyRotation::new(Vec3::new(0.0, HORIZON_SPIN_Y, HORIZON_SPIN_Z)),
            galaxy_body: BodyRotation::new(Vec3::new(0.0, GALAXY_ROTATION_SPEED, 0.0)),
            disk_instances,
            horizon_instances,
        };
        // Valid instances before the first host frame
        update_disk(&scene.disk, 0.0, &scene.params, &mut scene.disk_instances);
        Ok(scene)
    }

    /// Advance to host timestamp `now` (seconds) and refresh disk instances
    pub fn frame(&mut self, now: f64) {
        let dt = self.clock.advance(now);
        let t = self.clock.elapsed();
        update_disk(&self.disk, t, &self.params, &mut self.disk_instances);
        self.horizon_body.advance(dt);
        self.galaxy_body.advance(dt);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn params(&self) -> &AnimationParams {
        &self.params
    }

    pub fn set_params(&mut self, params: AnimationParams) {
        self.params = params;
    }

    /// Follow changed preferences. A quality change regenerates the fields
    /// from the same seed; time and body rotations carry over.
    pub fn apply_settings(&mut self, settings: &Settings) -> Result<()> {
        let galaxy_points = self.galaxy.as_ref().map_or(0, GalaxyField::len);
        if galaxy_points != settings.quality.galaxy_points()
            || self.stars.len() != settings.quality.star_points()
        {
            let rebuilt = Self::new(settings, Some(self.seed))?;
            let previous = std::mem::replace(self, rebuilt);
            self.clock = previous.clock;
            self.horizon_body = previous.horizon_body;
            self.galaxy_body = previous.galaxy_body;
        }
        self.set_params(settings.animation_params());
        update_disk(
            &self.disk,
            self.clock.elapsed(),
            &self.params,
            &mut self.disk_instances,
        );
        Ok(())
    }

    pub fn disk(&self) -> &DiskField {
        &self.disk
    }

    pub fn horizon(&self) -> &HorizonShell {
        &self.horizon
    }

    pub fn galaxy(&self) -> Option<&GalaxyField> {
        self.galaxy.as_ref()
    }

    /// Galaxy sprite size, 0 when there is no galaxy
    pub fn galaxy_point_size(&self) -> f32 {
        self.galaxy.as_ref().map_or(0.0, |g| g.config().point_size)
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    /// Star sprite multiplier for the current time
    pub fn star_twinkle(&self) -> f32 {
        self.stars.twinkle(self.clock.elapsed())
    }

    /// Radius of the solid black core inside the shell
    pub fn core_radius(&self) -> f32 {
        VOID_CORE_RADIUS
    }

    /// Clear color behind everything
    pub fn background(&self) -> Color {
        colors::BACKGROUND
    }

    /// Disk instances, relative to the tilted black hole group
    pub fn disk_instances(&self) -> &InstanceBuffer {
        &self.disk_instances
    }

    /// Static shell instances, relative to the horizon body
    pub fn horizon_instances(&self) -> &InstanceBuffer {
        &self.horizon_instances
    }

    /// Tilt of the black hole group (disk, horizon and core)
    pub fn group_matrix(&self) -> Mat4 {
        let [x, y, z] = SCENE_TILT;
        Mat4::from_euler(EulerRot::XYZ, x, y, z)
    }

    /// Horizon body transform within the group
    pub fn horizon_matrix(&self) -> Mat4 {
        self.horizon_body.matrix(Vec3::ZERO)
    }

    /// Galaxy transform in world space
    pub fn galaxy_matrix(&self) -> Mat4 {
        self.galaxy_body.matrix(Vec3::new(0.0, GALAXY_OFFSET_Y, 0.0))
    }
}
