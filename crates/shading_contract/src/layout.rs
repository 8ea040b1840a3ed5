//! Byte layout of the records shared with the shaders.
//!
//! Offsets are taken from the Rust declarations with `offset_of!`; the tests pin them to
//! the values the shaders declare.

use std::mem::{align_of, size_of};

use memoffset::offset_of;

use crate::{FragmentUniforms, Light, Material, Uniforms};

/// Shader-side type of a record member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Float,
    UInt,
    /// Three floats in a 16-byte slot.
    Vec3,
    /// Three 16-byte columns.
    Mat3,
    Mat4,
    /// `u32` tag holding a [`LightType`](crate::LightType).
    LightType,
}

impl FieldKind {
    /// Bytes the member occupies, padding included.
    pub fn size(self) -> usize {
        match self {
            FieldKind::Float | FieldKind::UInt | FieldKind::LightType => 4,
            FieldKind::Vec3 => 16,
            FieldKind::Mat3 => 48,
            FieldKind::Mat4 => 64,
        }
    }

    /// Bytes holding data; a `Vec3` leaves its last 4 bytes as padding.
    pub fn data_size(self) -> usize {
        match self {
            FieldKind::Vec3 => 12,
            kind => kind.size(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub kind: FieldKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLayout {
    pub name: &'static str,
    pub size: usize,
    pub align: usize,
    pub fields: Vec<FieldLayout>,
}

impl RecordLayout {
    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True when fields are in ascending, non-overlapping order and fit in the record.
    pub fn is_consistent(&self) -> bool {
        let ordered = self
            .fields
            .windows(2)
            .all(|pair| pair[0].offset + pair[0].kind.size() <= pair[1].offset);
        let fits = self
            .fields
            .last()
            .map_or(true, |f| f.offset + f.kind.size() <= self.size);
        ordered && fits && self.size % 16 == 0
    }
}

/// A record uploaded verbatim into a GPU buffer.
pub trait GpuRecord: Copy + 'static {
    const NAME: &'static str;

    fn layout() -> RecordLayout;
}

macro_rules! record_layout {
    ($ty:ident, $($field:ident: $kind:ident),+ $(,)?) => {
        RecordLayout {
            name: <$ty as GpuRecord>::NAME,
            size: size_of::<$ty>(),
            align: align_of::<$ty>(),
            fields: vec![$(FieldLayout {
                name: stringify!($field),
                offset: offset_of!($ty, $field),
                kind: FieldKind::$kind,
            }),+],
        }
    };
}

impl GpuRecord for Material {
    const NAME: &'static str = "Material";

    fn layout() -> RecordLayout {
        record_layout!(
            Material,
            base_color: Vec3,
            specular_color: Vec3,
            roughness: Float,
            metallic: Float,
            ambient_occlusion: Vec3,
            shininess: Float,
        )
    }
}

impl GpuRecord for Uniforms {
    const NAME: &'static str = "Uniforms";

    fn layout() -> RecordLayout {
        record_layout!(
            Uniforms,
            model_matrix: Mat4,
            view_matrix: Mat4,
            projection_matrix: Mat4,
            normal_matrix: Mat3,
        )
    }
}

impl GpuRecord for Light {
    const NAME: &'static str = "Light";

    fn layout() -> RecordLayout {
        record_layout!(
            Light,
            cone_angle: Float,
            cone_direction: Vec3,
            cone_attenuation: Float,
            position: Vec3,
            color: Vec3,
            specular_color: Vec3,
            intensity: Float,
            attenuation: Vec3,
            light_type: LightType,
        )
    }
}

impl GpuRecord for FragmentUniforms {
    const NAME: &'static str = "FragmentUniforms";

    fn layout() -> RecordLayout {
        record_layout!(
            FragmentUniforms,
            light_count: UInt,
            camera_position: Vec3,
            tiling: UInt,
        )
    }
}

/// Layouts of every record, in binding order.
pub fn all_layouts() -> Vec<RecordLayout> {
    vec![
        Uniforms::layout(),
        Light::layout(),
        FragmentUniforms::layout(),
        Material::layout(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(layout: &RecordLayout) -> Vec<(&'static str, usize)> {
        layout.fields.iter().map(|f| (f.name, f.offset)).collect()
    }

    #[test]
    fn material_golden_layout() {
        let layout = Material::layout();
        assert_eq!(layout.size, 80);
        assert_eq!(
            offsets(&layout),
            vec![
                ("base_color", 0),
                ("specular_color", 16),
                ("roughness", 32),
                ("metallic", 36),
                ("ambient_occlusion", 48),
                ("shininess", 64),
            ]
        );
    }

    #[test]
    fn uniforms_golden_layout() {
        let layout = Uniforms::layout();
        assert_eq!(layout.size, 240);
        assert_eq!(
            offsets(&layout),
            vec![
                ("model_matrix", 0),
                ("view_matrix", 64),
                ("projection_matrix", 128),
                ("normal_matrix", 192),
            ]
        );
    }

    #[test]
    fn light_golden_layout() {
        let layout = Light::layout();
        assert_eq!(layout.size, 144);
        assert_eq!(
            offsets(&layout),
            vec![
                ("cone_angle", 0),
                ("cone_direction", 16),
                ("cone_attenuation", 32),
                ("position", 48),
                ("color", 64),
                ("specular_color", 80),
                ("intensity", 96),
                ("attenuation", 112),
                ("light_type", 128),
            ]
        );
    }

    #[test]
    fn fragment_uniforms_golden_layout() {
        let layout = FragmentUniforms::layout();
        assert_eq!(layout.size, 48);
        assert_eq!(
            offsets(&layout),
            vec![("light_count", 0), ("camera_position", 16), ("tiling", 32)]
        );
    }

    #[test]
    fn every_layout_is_consistent() {
        for layout in all_layouts() {
            assert!(layout.is_consistent(), "{} is inconsistent", layout.name);
        }
    }

    #[test]
    fn field_lookup_by_name() {
        let layout = Light::layout();
        let field = layout.field("intensity").unwrap();
        assert_eq!(field.offset, 96);
        assert_eq!(field.kind, FieldKind::Float);
        assert!(layout.field("missing").is_none());
    }
}
