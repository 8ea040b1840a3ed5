use bytemuck::{Pod, Zeroable};
use derive_builder::Builder;
use glam::Vec3;

/// Surface shading parameters, uploaded verbatim to [`BufferSlot::Materials`].
///
/// Every `Vec3` occupies a 16-byte slot; the padding is spelled out so the record has no
/// uninitialised bytes.
///
/// [`BufferSlot::Materials`]: crate::BufferSlot::Materials
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Material {
    pub base_color: Vec3,
    pub _padding0: f32,
    pub specular_color: Vec3,
    pub _padding1: f32,
    pub roughness: f32,
    pub metallic: f32,
    pub _padding2: [f32; 2],
    pub ambient_occlusion: Vec3,
    pub _padding3: f32,
    pub shininess: f32,
    pub _padding4: [f32; 3],
}

const _: () = assert!(std::mem::size_of::<Material>() == 80);

impl Material {
    pub fn new(
        base_color: Vec3,
        specular_color: Vec3,
        roughness: f32,
        metallic: f32,
        ambient_occlusion: Vec3,
        shininess: f32,
    ) -> Self {
        Self {
            base_color,
            specular_color,
            roughness,
            metallic,
            ambient_occlusion,
            shininess,
            ..Zeroable::zeroed()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        MaterialDesc::default().into()
    }
}

/// Material parameters as an asset loader describes them.
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct MaterialDesc {
    #[builder(default = "Vec3::ONE")]
    pub base_color: Vec3,
    #[builder(default = "Vec3::ONE")]
    pub specular_color: Vec3,
    #[builder(default = "1.0")]
    pub roughness: f32,
    #[builder(default = "0.0")]
    pub metallic: f32,
    #[builder(default = "Vec3::ONE")]
    pub ambient_occlusion: Vec3,
    #[builder(default = "32.0")]
    pub shininess: f32,
}

impl MaterialDescBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(roughness) = self.roughness {
            if !(0.0..=1.0).contains(&roughness) {
                return Err(format!("roughness {roughness} outside [0, 1]"));
            }
        }
        if let Some(metallic) = self.metallic {
            if !(0.0..=1.0).contains(&metallic) {
                return Err(format!("metallic {metallic} outside [0, 1]"));
            }
        }
        if let Some(shininess) = self.shininess {
            if !shininess.is_finite() || shininess < 0.0 {
                return Err(format!("shininess {shininess} must be finite and >= 0"));
            }
        }
        Ok(())
    }
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            base_color: Vec3::ONE,
            specular_color: Vec3::ONE,
            roughness: 1.0,
            metallic: 0.0,
            ambient_occlusion: Vec3::ONE,
            shininess: 32.0,
        }
    }
}

impl From<MaterialDesc> for Material {
    fn from(desc: MaterialDesc) -> Self {
        Material::new(
            desc.base_color,
            desc.specular_color,
            desc.roughness,
            desc.metallic,
            desc.ambient_occlusion,
            desc.shininess,
        )
    }
}
