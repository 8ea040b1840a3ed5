use bytemuck::{CheckedBitPattern, NoUninit};
use glam::Vec3;

use crate::error::{ContractError, Result};
use crate::fragment::FragmentUniforms;

/// Capacity of the shader-side light array.
pub const MAX_LIGHTS: usize = 16;

/// Which [`Light`] fields the fragment stage reads.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, NoUninit, CheckedBitPattern)]
pub enum LightType {
    #[default]
    Unused = 0,
    Sun = 1,
    Spot = 2,
    Point = 3,
    Ambient = 4,
}

impl LightType {
    pub const ALL: [LightType; 5] = [
        LightType::Unused,
        LightType::Sun,
        LightType::Spot,
        LightType::Point,
        LightType::Ambient,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LightType::Unused => "Unused",
            LightType::Sun => "Sun",
            LightType::Spot => "Spot",
            LightType::Point => "Point",
            LightType::Ambient => "Ambient",
        }
    }
}

impl TryFrom<u32> for LightType {
    type Error = ContractError;

    fn try_from(tag: u32) -> Result<Self> {
        LightType::ALL
            .into_iter()
            .find(|ty| *ty as u32 == tag)
            .ok_or(ContractError::UnknownLightType(tag))
    }
}

/// One element of the light array bound at [`BufferSlot::Lights`].
///
/// Holds the union of every light kind's parameters so the array has a fixed stride:
///
/// - `cone_*` fields are read for `Spot` only
/// - `position` and `attenuation` for `Spot` and `Point`
///   (`Sun` reads `position` as the direction the light comes from)
/// - `color`, `specular_color` and `intensity` for every kind
///
/// [`BufferSlot::Lights`]: crate::BufferSlot::Lights
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, NoUninit, CheckedBitPattern)]
pub struct Light {
    pub cone_angle: f32,
    pub _padding0: [f32; 3],
    pub cone_direction: Vec3,
    pub _padding1: f32,
    pub cone_attenuation: f32,
    pub _padding2: [f32; 3],
    pub position: Vec3,
    pub _padding3: f32,
    pub color: Vec3,
    pub _padding4: f32,
    pub specular_color: Vec3,
    pub _padding5: f32,
    pub intensity: f32,
    pub _padding6: [f32; 3],
    /// Constant, linear and quadratic falloff coefficients.
    pub attenuation: Vec3,
    pub _padding7: f32,
    pub light_type: LightType,
    pub _padding8: [u32; 3],
}

const _: () = assert!(std::mem::size_of::<Light>() == 144);

impl Light {
    /// An all-zero `Unused` entry, used to fill the array past the light count.
    pub const UNUSED: Light = Light {
        cone_angle: 0.0,
        _padding0: [0.0; 3],
        cone_direction: Vec3::ZERO,
        _padding1: 0.0,
        cone_attenuation: 0.0,
        _padding2: [0.0; 3],
        position: Vec3::ZERO,
        _padding3: 0.0,
        color: Vec3::ZERO,
        _padding4: 0.0,
        specular_color: Vec3::ZERO,
        _padding5: 0.0,
        intensity: 0.0,
        _padding6: [0.0; 3],
        attenuation: Vec3::ZERO,
        _padding7: 0.0,
        light_type: LightType::Unused,
        _padding8: [0; 3],
    };

    pub fn is_used(&self) -> bool {
        self.light_type != LightType::Unused
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::UNUSED
    }
}

/// Fixed-capacity light array as uploaded to [`BufferSlot::Lights`].
///
/// Entries past `count` are [`Light::UNUSED`].
///
/// [`BufferSlot::Lights`]: crate::BufferSlot::Lights
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightArray {
    lights: [Light; MAX_LIGHTS],
    count: usize,
}

impl LightArray {
    /// Fails when `lights` does not fit in [`MAX_LIGHTS`].
    pub fn from_slice(lights: &[Light]) -> Result<Self> {
        if lights.len() > MAX_LIGHTS {
            return Err(ContractError::TooManyLights {
                count: lights.len(),
                capacity: MAX_LIGHTS,
            });
        }
        Ok(Self::truncated(lights))
    }

    /// Keeps the first [`MAX_LIGHTS`] entries and drops the rest.
    pub fn truncated(lights: &[Light]) -> Self {
        let count = lights.len().min(MAX_LIGHTS);
        let mut array = [Light::UNUSED; MAX_LIGHTS];
        array[..count].copy_from_slice(&lights[..count]);
        Self {
            lights: array,
            count,
        }
    }

    pub fn count(&self) -> u32 {
        self.count as u32
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The valid entries.
    pub fn active(&self) -> &[Light] {
        &self.lights[..self.count]
    }

    /// The full array, unused tail included.
    pub fn as_array(&self) -> &[Light; MAX_LIGHTS] {
        &self.lights
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.lights.as_slice())
    }

    /// Fragment uniforms whose light count matches this array.
    pub fn fragment_uniforms(&self, camera_position: Vec3, tiling: u32) -> FragmentUniforms {
        FragmentUniforms::new(self.count(), camera_position, tiling)
    }
}

impl Default for LightArray {
    fn default() -> Self {
        Self::truncated(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_type_tags_match_shader() {
        let tags: Vec<u32> = LightType::ALL.iter().map(|ty| *ty as u32).collect();
        assert_eq!(tags, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn light_type_from_tag() {
        assert_eq!(LightType::try_from(2).unwrap(), LightType::Spot);
        assert!(matches!(
            LightType::try_from(9),
            Err(ContractError::UnknownLightType(9))
        ));
    }

    #[test]
    fn default_light_is_unused_and_zeroed() {
        let light = Light::default();
        assert!(!light.is_used());
        assert!(bytemuck::bytes_of(&light).iter().all(|b| *b == 0));
    }

    fn sun() -> Light {
        Light {
            light_type: LightType::Sun,
            color: Vec3::ONE,
            intensity: 0.6,
            ..Light::UNUSED
        }
    }

    #[test]
    fn array_rejects_overflow() {
        let lights = vec![sun(); MAX_LIGHTS + 1];
        assert!(matches!(
            LightArray::from_slice(&lights),
            Err(ContractError::TooManyLights { count, capacity })
                if count == MAX_LIGHTS + 1 && capacity == MAX_LIGHTS
        ));
    }

    #[test]
    fn truncated_array_keeps_capacity() {
        let lights = vec![sun(); MAX_LIGHTS + 4];
        let array = LightArray::truncated(&lights);
        assert_eq!(array.count() as usize, MAX_LIGHTS);
        assert!(array.active().iter().all(Light::is_used));
    }

    #[test]
    fn tail_entries_are_unused() {
        let array = LightArray::from_slice(&[sun(), sun()]).unwrap();
        assert_eq!(array.count(), 2);
        assert!(array.as_array()[2..].iter().all(|l| !l.is_used()));
        assert_eq!(array.as_bytes().len(), MAX_LIGHTS * 144);
    }

    #[test]
    fn fragment_uniforms_follow_count() {
        let array = LightArray::from_slice(&[sun(); 3]).unwrap();
        let uniforms = array.fragment_uniforms(Vec3::new(0.0, 1.0, 5.0), 4);
        assert_eq!(uniforms.light_count, 3);
        assert_eq!(uniforms.tiling, 4);
    }
}
