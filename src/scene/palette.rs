//! Colors and palettes

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// sRGB-encoded color straight from its hex code, components in 0..1 (may
/// exceed 1 after brightening). The host decodes to linear if it lights them.
pub type Color = Vec3;

/// Build a color from a packed 0xRRGGBB value
pub const fn rgb(hex: u32) -> Color {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Named scene colors
pub mod colors {
    use super::{Color, rgb};

    pub const AMBER: Color = rgb(0xffaa00);
    pub const EMBER: Color = rgb(0xff5500);
    pub const PEACH: Color = rgb(0xffcc88);
    pub const WHITE: Color = rgb(0xffffff);
    pub const CRIMSON: Color = rgb(0xaa0000);

    /// Galaxy core and arm tips
    pub const GALAXY_INSIDE: Color = rgb(0xff6030);
    pub const GALAXY_OUTSIDE: Color = rgb(0x1b3984);

    pub const HORIZON: Color = rgb(0x000000);
    pub const BACKGROUND: Color = rgb(0x020202);
}

/// Fixed set of colors particles pick from by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// The hot accretion disk palette
    pub fn accretion() -> Self {
        Self::new(vec![
            colors::AMBER,
            colors::EMBER,
            colors::PEACH,
            colors::WHITE,
            colors::CRIMSON,
        ])
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<Color> {
        self.colors.get(id).copied()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::accretion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_keeps_encoded_bytes() {
        let c = rgb(0xff5500);
        assert_eq!(c.x, 1.0);
        assert!((c.y - 85.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.z, 0.0);
        // Mid grey stays at its encoded value rather than ~0.216 linear
        assert!((rgb(0x808080).x - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_accretion_palette() {
        let palette = Palette::accretion();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.get(0), Some(rgb(0xffaa00)));
        assert_eq!(palette.get(4), Some(rgb(0xaa0000)));
        assert!(palette.get(5).is_none());
    }
}
