use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::light::MAX_LIGHTS;

/// Scene-wide fragment-stage parameters bound at [`BufferSlot::FragmentUniforms`].
///
/// [`BufferSlot::FragmentUniforms`]: crate::BufferSlot::FragmentUniforms
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FragmentUniforms {
    /// Number of valid entries at the start of the light array.
    pub light_count: u32,
    pub _padding0: [u32; 3],
    pub camera_position: Vec3,
    pub _padding1: f32,
    /// Texture repeat count.
    pub tiling: u32,
    pub _padding2: [u32; 3],
}

const _: () = assert!(std::mem::size_of::<FragmentUniforms>() == 48);

impl FragmentUniforms {
    /// `light_count` is clamped to [`MAX_LIGHTS`].
    pub fn new(light_count: u32, camera_position: Vec3, tiling: u32) -> Self {
        Self {
            light_count: light_count.min(MAX_LIGHTS as u32),
            camera_position,
            tiling,
            ..Zeroable::zeroed()
        }
    }
}

impl Default for FragmentUniforms {
    fn default() -> Self {
        Self::new(0, Vec3::ZERO, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_count_is_clamped_to_capacity() {
        let uniforms = FragmentUniforms::new(100, Vec3::ZERO, 1);
        assert_eq!(uniforms.light_count, MAX_LIGHTS as u32);
    }

    #[test]
    fn default_tiles_once() {
        let uniforms = FragmentUniforms::default();
        assert_eq!(uniforms.tiling, 1);
        assert_eq!(uniforms.light_count, 0);
    }
}
