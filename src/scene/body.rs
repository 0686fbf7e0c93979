//! Whole-body rotation for fields that spin as a unit

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::normalize_angle;

/// Euler angles advanced at constant rates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyRotation {
    /// Current angles (radians, XYZ order)
    pub angles: Vec3,
    /// Rates (radians/s)
    pub rates: Vec3,
}

impl BodyRotation {
    pub fn new(rates: Vec3) -> Self {
        Self {
            angles: Vec3::ZERO,
            rates,
        }
    }

    /// Advance by `dt` seconds, keeping angles in [-π, π)
    pub fn advance(&mut self, dt: f32) {
        let next = self.angles + self.rates * dt;
        self.angles = Vec3::new(
            normalize_angle(next.x),
            normalize_angle(next.y),
            normalize_angle(next.z),
        );
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.angles.x, self.angles.y, self.angles.z)
    }

    /// Body transform placed at `offset`
    pub fn matrix(&self, offset: Vec3) -> Mat4 {
        Mat4::from_rotation_translation(self.quat(), offset)
    }
}
