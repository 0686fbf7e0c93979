//! Per-frame instance updates
//!
//! Every disk voxel's transform is a closed-form function of its descriptor,
//! the elapsed time and its index. Nothing is integrated or carried between
//! frames, so any frame can be recomputed independently and a full update is
//! O(N).

use glam::{Mat4, Quat, Vec3};

use super::disk::{DiskField, ParticleDescriptor};
use super::palette::{Color, Palette};
use crate::consts::*;
use crate::renderer::{InstanceBuffer, InstanceRaw};
use crate::{face_toward, orbit_to_cartesian};

/// Tunables for the disk animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    pub wave_amplitude: f32,
    pub wave_frequency: f32,
    pub flicker_enabled: bool,
    pub flicker_rate: f32,
    pub flicker_threshold: f32,
    pub brightness_boost: f32,
    pub inner_contrast_cutoff: f32,
    pub inner_darken: f32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            wave_amplitude: WAVE_AMPLITUDE,
            wave_frequency: WAVE_FREQUENCY,
            flicker_enabled: true,
            flicker_rate: FLICKER_RATE,
            flicker_threshold: FLICKER_THRESHOLD,
            brightness_boost: FLICKER_BOOST,
            inner_contrast_cutoff: INNER_CONTRAST_CUTOFF,
            inner_darken: INNER_DARKEN,
        }
    }
}

impl AnimationParams {
    /// Same motion without brightness pulses
    pub fn reduced_motion() -> Self {
        Self {
            flicker_enabled: false,
            ..Self::default()
        }
    }
}

/// Transform and color of one instance for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub color: Color,
}

impl FrameTransform {
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }

    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw::new(self.to_matrix(), self.color)
    }
}

/// Deterministic brightness pulse: `sin(t·rate + index) > threshold`.
///
/// Keyed only by time and index, so the same `t` always gives the same
/// answer regardless of frame rate.
#[inline]
pub fn flicker(t: f32, index: usize, rate: f32, threshold: f32) -> bool {
    (t * rate + index as f32).sin() > threshold
}

/// Transform of disk particle `index` at elapsed time `t`
pub fn update_instance(
    descriptor: &ParticleDescriptor,
    t: f32,
    index: usize,
    palette: &Palette,
    params: &AnimationParams,
) -> FrameTransform {
    let current_angle = descriptor.angle + t * descriptor.angular_speed;
    let y = descriptor.y_offset
        + (t * params.wave_frequency + descriptor.radius).sin() * params.wave_amplitude;
    let position = orbit_to_cartesian(descriptor.radius, current_angle, y);

    let mut color = palette.get(descriptor.color_id).unwrap_or(Vec3::ONE);
    if params.flicker_enabled
        && flicker(t, index, params.flicker_rate, params.flicker_threshold)
    {
        color *= params.brightness_boost;
    }
    if descriptor.radius < params.inner_contrast_cutoff {
        color *= params.inner_darken;
    }

    FrameTransform {
        position,
        rotation: face_toward(position, Vec3::ZERO),
        scale: descriptor.scale,
        color,
    }
}

/// Rewrite every disk instance for time `t`.
///
/// The buffer must have been sized for the field; extra slots (if any) are
/// left untouched.
pub fn update_disk(field: &DiskField, t: f32, params: &AnimationParams, buffer: &mut InstanceBuffer) {
    debug_assert_eq!(buffer.len(), field.len());
    let palette = field.palette();
    for (index, (slot, descriptor)) in buffer
        .as_mut_slice()
        .iter_mut()
        .zip(field.particles())
        .enumerate()
    {
        *slot = update_instance(descriptor, t, index, palette, params).to_raw();
    }
}
