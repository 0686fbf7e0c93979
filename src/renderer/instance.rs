//! Per-instance data for the host renderer
//!
//! Buffers are sized once when a field is generated and overwritten in place
//! every frame; they are never resized.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// One drawable voxel: column-major model matrix plus RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    /// Number of f32 values per instance
    pub const FLOATS: usize = 20;

    pub fn new(model: Mat4, color: Vec3) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.extend(1.0).to_array(),
        }
    }
}

/// Fixed-length instance storage
#[derive(Debug, Clone)]
pub struct InstanceBuffer {
    instances: Vec<InstanceRaw>,
}

impl InstanceBuffer {
    /// Zeroed buffer holding `len` instances
    pub fn with_len(len: usize) -> Self {
        Self {
            instances: vec![InstanceRaw::zeroed(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn as_slice(&self) -> &[InstanceRaw] {
        &self.instances
    }

    pub fn as_mut_slice(&mut self) -> &mut [InstanceRaw] {
        &mut self.instances
    }

    /// Raw bytes, ready for a GPU buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Flat f32 view (`FLOATS` values per instance)
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<InstanceRaw>(), InstanceRaw::FLOATS * 4);
        let buffer = InstanceBuffer::with_len(3);
        assert_eq!(buffer.as_floats().len(), 3 * InstanceRaw::FLOATS);
        assert_eq!(buffer.as_bytes().len(), 3 * InstanceRaw::FLOATS * 4);
    }

    #[test]
    fn test_translation_lands_in_last_column() {
        let raw = InstanceRaw::new(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)), Vec3::ONE);
        assert_eq!(raw.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(raw.color, [1.0, 1.0, 1.0, 1.0]);

        let mut buffer = InstanceBuffer::with_len(1);
        buffer.as_mut_slice()[0] = raw;
        assert_eq!(&buffer.as_floats()[12..16], &[1.0, 2.0, 3.0, 1.0]);
    }
}
