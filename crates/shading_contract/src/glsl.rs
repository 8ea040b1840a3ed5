//! GLSL declarations generated from the layout table.
//!
//! Gaps in the host layout become `float` padding members, so a `vec3` followed by a
//! scalar keeps the 16-byte slot the host records use under both std140 and std430.

use std::fmt::Write;

use crate::layout::{all_layouts, FieldKind, RecordLayout};
use crate::light::{LightType, MAX_LIGHTS};
use crate::slots::{
    BufferSlot, TextureSlot, VertexAttributeSlot, BUFFER_DESCRIPTOR_SET, TEXTURE_DESCRIPTOR_SET,
};

fn glsl_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Float => "float",
        FieldKind::UInt | FieldKind::LightType => "uint",
        FieldKind::Vec3 => "vec3",
        FieldKind::Mat3 => "mat3",
        FieldKind::Mat4 => "mat4",
    }
}

fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `struct` declaration for one record.
pub fn struct_declaration(layout: &RecordLayout) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// {} bytes", layout.size);
    let _ = writeln!(out, "struct {} {{", layout.name);

    let mut cursor = 0;
    let mut pad = 0;
    let mut pad_to = |out: &mut String, cursor: &mut usize, target: usize| {
        while *cursor < target {
            let _ = writeln!(out, "    float _padding{pad};");
            pad += 1;
            *cursor += 4;
        }
    };

    for field in &layout.fields {
        pad_to(&mut out, &mut cursor, field.offset);
        let _ = writeln!(
            out,
            "    {} {};",
            glsl_type(field.kind),
            camel_case(field.name)
        );
        cursor = field.offset + field.kind.data_size();
    }
    pad_to(&mut out, &mut cursor, layout.size);

    out.push_str("};\n");
    out
}

/// Binding constants, light type tags and every record declaration.
pub fn contract_header() -> String {
    let mut out = String::from("// Generated from shading_contract. Do not edit.\n\n");

    let _ = writeln!(out, "#define BUFFER_SET {BUFFER_DESCRIPTOR_SET}");
    let _ = writeln!(out, "#define TEXTURE_SET {TEXTURE_DESCRIPTOR_SET}");
    let _ = writeln!(out, "#define MAX_LIGHTS {MAX_LIGHTS}");
    out.push('\n');

    let mut define = |prefix: &str, name: &str, value: u32| {
        let _ = writeln!(out, "#define {prefix}_{} {value}", constant_case(name));
    };
    for slot in BufferSlot::ALL {
        define("BUFFER_INDEX", slot.name(), slot.index());
    }
    for slot in VertexAttributeSlot::ALL {
        define("ATTRIBUTE", slot.name(), slot.location());
    }
    for slot in TextureSlot::ALL {
        define("TEXTURE", slot.name(), slot.index());
    }
    for ty in LightType::ALL {
        define("LIGHT", ty.name(), ty as u32);
    }

    for layout in all_layouts() {
        out.push('\n');
        out.push_str(&struct_declaration(&layout));
    }
    out
}

fn constant_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = c.is_lowercase();
        out.extend(c.to_uppercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GpuRecord;
    use crate::{FragmentUniforms, Light, Material, Uniforms};

    #[test]
    fn light_struct_pads_vec3_slots() {
        let decl = struct_declaration(&Light::layout());
        let expected_head = "// 144 bytes\n\
            struct Light {\n    \
            float coneAngle;\n    \
            float _padding0;\n    \
            float _padding1;\n    \
            float _padding2;\n    \
            vec3 coneDirection;\n    \
            float _padding3;\n    \
            float coneAttenuation;\n";
        assert!(decl.starts_with(expected_head), "{decl}");
        let expected_tail = "    uint lightType;\n    \
            float _padding14;\n    \
            float _padding15;\n    \
            float _padding16;\n\
            };\n";
        assert!(decl.ends_with(expected_tail), "{decl}");
    }

    #[test]
    fn fragment_uniforms_declaration() {
        let decl = struct_declaration(&FragmentUniforms::layout());
        assert_eq!(
            member_lines(&decl),
            vec![
                "uint lightCount;",
                "float _padding0;",
                "float _padding1;",
                "float _padding2;",
                "vec3 cameraPosition;",
                "float _padding3;",
                "uint tiling;",
                "float _padding4;",
                "float _padding5;",
                "float _padding6;",
                "};",
            ]
        );
    }

    fn member_lines(decl: &str) -> Vec<&str> {
        decl.lines().skip(2).map(str::trim).collect()
    }

    #[test]
    fn material_declaration_pads_scalars_and_tail() {
        let decl = struct_declaration(&Material::layout());
        assert!(decl.starts_with("// 80 bytes\nstruct Material {\n"), "{decl}");
        assert_eq!(
            member_lines(&decl),
            vec![
                "vec3 baseColor;",
                "float _padding0;",
                "vec3 specularColor;",
                "float _padding1;",
                "float roughness;",
                "float metallic;",
                "float _padding2;",
                "float _padding3;",
                "vec3 ambientOcclusion;",
                "float _padding4;",
                "float shininess;",
                "float _padding5;",
                "float _padding6;",
                "float _padding7;",
                "};",
            ]
        );
    }

    #[test]
    fn uniforms_declaration_ends_with_normal_matrix() {
        let decl = struct_declaration(&Uniforms::layout());
        assert!(decl.starts_with("// 240 bytes\nstruct Uniforms {\n"), "{decl}");
        assert_eq!(
            member_lines(&decl),
            vec![
                "mat4 modelMatrix;",
                "mat4 viewMatrix;",
                "mat4 projectionMatrix;",
                "mat3 normalMatrix;",
                "};",
            ]
        );
    }

    #[test]
    fn header_defines_bindings() {
        let header = contract_header();
        assert!(header.contains("#define BUFFER_INDEX_VERTICES 0"));
        assert!(header.contains("#define BUFFER_INDEX_FRAGMENT_UNIFORMS 13"));
        assert!(header.contains("#define ATTRIBUTE_BITANGENT 4"));
        assert!(header.contains("#define TEXTURE_BASE_COLOR 0"));
        assert!(header.contains("#define LIGHT_AMBIENT 4"));
        assert!(header.contains("struct Material {"));
        assert!(header.contains("    mat4 projectionMatrix;\n    mat3 normalMatrix;\n};"));
    }

    #[test]
    fn case_conversions() {
        assert_eq!(camel_case("ambient_occlusion"), "ambientOcclusion");
        assert_eq!(constant_case("FragmentUniforms"), "FRAGMENT_UNIFORMS");
        assert_eq!(constant_case("UV"), "UV");
    }
}
