//! Event Horizon - a voxel black hole with an in-character chat companion
//!
//! Core modules:
//! - `scene`: Procedural particle fields and per-frame instance updates
//! - `renderer`: Instance buffers handed to the host renderer
//! - `chat`: Conversation with a hosted text-generation model
//! - `settings`: Persisted preferences

pub mod chat;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use settings::{QualityPreset, Settings};

use glam::{Mat3, Quat, Vec3};

/// Scene configuration constants
pub mod consts {
    /// Largest frame delta fed to rate-based motion (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Accretion disk defaults
    pub const DISK_COUNT: usize = 3000;
    pub const DISK_INNER_RADIUS: f32 = 4.0;
    pub const DISK_OUTER_RADIUS: f32 = 14.0;
    /// Vertical spread as a fraction of orbital radius
    pub const DISK_THICKNESS: f32 = 0.15;
    /// Angular speed = base + factor / radius (radians/s)
    pub const DISK_BASE_SPEED: f32 = 0.02;
    pub const DISK_SPEED_FACTOR: f32 = 0.05;
    pub const DISK_MIN_SCALE: f32 = 0.2;
    pub const DISK_MAX_SCALE: f32 = 0.5;

    /// Disk animation
    pub const WAVE_AMPLITUDE: f32 = 0.2;
    pub const WAVE_FREQUENCY: f32 = 2.0;
    pub const FLICKER_RATE: f32 = 5.0;
    pub const FLICKER_THRESHOLD: f32 = 0.9;
    pub const FLICKER_BOOST: f32 = 1.5;
    /// Particles orbiting inside this radius are darkened for contrast
    pub const INNER_CONTRAST_CUTOFF: f32 = 4.5;
    pub const INNER_DARKEN: f32 = 0.5;

    /// Event horizon shell defaults
    pub const HORIZON_COUNT: usize = 800;
    pub const HORIZON_BASE_RADIUS: f32 = 2.8;
    pub const HORIZON_JITTER: f32 = 0.4;
    pub const HORIZON_MIN_SCALE: f32 = 0.3;
    pub const HORIZON_MAX_SCALE: f32 = 0.5;
    /// Whole-body spin of the shell (radians/s around Y and Z)
    pub const HORIZON_SPIN_Y: f32 = -0.12;
    pub const HORIZON_SPIN_Z: f32 = 0.06;
    /// Solid core sphere hiding the inside of the shell
    pub const VOID_CORE_RADIUS: f32 = 3.5;

    /// Background galaxy defaults
    pub const GALAXY_COUNT: usize = 12_000;
    pub const GALAXY_RADIUS: f32 = 60.0;
    pub const GALAXY_BRANCHES: u32 = 5;
    pub const GALAXY_SPIN: f32 = 1.2;
    pub const GALAXY_RANDOMNESS: f32 = 0.6;
    pub const GALAXY_RANDOMNESS_POWER: f32 = 3.0;
    pub const GALAXY_POINT_SIZE: f32 = 0.08;
    pub const GALAXY_ROTATION_SPEED: f32 = 0.02;
    pub const GALAXY_OFFSET_Y: f32 = -5.0;

    /// Background star shell defaults
    pub const STARS_COUNT: usize = 3000;
    pub const STARS_RADIUS: f32 = 200.0;
    pub const STARS_DEPTH: f32 = 50.0;
    pub const STARS_FACTOR: f32 = 4.0;
    pub const STARS_LIGHTNESS: f32 = 0.9;
    pub const STARS_TWINKLE_SPEED: f32 = 0.5;

    /// Tilt of the black hole group (Euler XYZ, radians)
    pub const SCENE_TILT: [f32; 3] = [0.4, 0.0, 0.2];
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Point on a horizontal orbit of the given radius, lifted to height `y`
#[inline]
pub fn orbit_to_cartesian(radius: f32, angle: f32, y: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Convert spherical (r, azimuth θ, polar φ) to cartesian
#[inline]
pub fn spherical_to_cartesian(r: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Rotation that points an object's +Z axis at `target`, keeping +Y up.
///
/// Returns identity when the direction is undefined (object sits on the
/// target or directly above/below it).
pub fn face_toward(position: Vec3, target: Vec3) -> Quat {
    let forward = (target - position).normalize_or_zero();
    let right = Vec3::Y.cross(forward).normalize_or_zero();
    if forward == Vec3::ZERO || right == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        use std::f32::consts::TAU;
        assert!((normalize_angle(2.5 * TAU + 0.3) - (0.3 - PI)).abs() < 1e-4);
        // Either end of the wrap is acceptable for an odd multiple of π
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(-0.5) - (-0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_face_toward_points_forward_at_target() {
        let pos = Vec3::new(5.0, 0.3, -2.0);
        let rot = face_toward(pos, Vec3::ZERO);
        let forward = rot * Vec3::Z;
        let expected = (-pos).normalize();
        assert!((forward - expected).length() < 1e-4);
        // Up stays in the upper hemisphere
        assert!((rot * Vec3::Y).y > 0.0);
    }

    #[test]
    fn test_face_toward_degenerate() {
        assert_eq!(face_toward(Vec3::ZERO, Vec3::ZERO), Quat::IDENTITY);
        assert_eq!(face_toward(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO), Quat::IDENTITY);
    }

    #[test]
    fn test_spherical_poles() {
        let north = spherical_to_cartesian(2.0, 1.0, 0.0);
        assert!((north - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
    }
}
