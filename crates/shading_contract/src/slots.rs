//! Binding points shared with the shader programs.
//!
//! Every value here is mirrored by a declaration on the shader side. Changing a
//! discriminant without changing the shader silently breaks rendering, so the sets are
//! closed and checked at compile time.

use ash::vk;

/// Buffer binding indices.
///
/// Indices 1 through 10 are reserved and carry no meaning.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferSlot {
    Vertices = 0,
    Uniforms = 11,
    Lights = 12,
    FragmentUniforms = 13,
    Materials = 14,
}

impl BufferSlot {
    pub const ALL: [BufferSlot; 5] = [
        BufferSlot::Vertices,
        BufferSlot::Uniforms,
        BufferSlot::Lights,
        BufferSlot::FragmentUniforms,
        BufferSlot::Materials,
    ];

    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Descriptor type and shader stages for slots bound through a descriptor set.
    ///
    /// `Vertices` is a vertex input binding, not a descriptor, and returns `None`.
    pub fn descriptor(self) -> Option<(vk::DescriptorType, vk::ShaderStageFlags)> {
        match self {
            BufferSlot::Vertices => None,
            BufferSlot::Uniforms => Some((
                vk::DescriptorType::UNIFORM_BUFFER,
                vk::ShaderStageFlags::VERTEX,
            )),
            BufferSlot::Lights => Some((
                vk::DescriptorType::STORAGE_BUFFER,
                vk::ShaderStageFlags::FRAGMENT,
            )),
            BufferSlot::FragmentUniforms | BufferSlot::Materials => Some((
                vk::DescriptorType::UNIFORM_BUFFER,
                vk::ShaderStageFlags::FRAGMENT,
            )),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BufferSlot::Vertices => "Vertices",
            BufferSlot::Uniforms => "Uniforms",
            BufferSlot::Lights => "Lights",
            BufferSlot::FragmentUniforms => "FragmentUniforms",
            BufferSlot::Materials => "Materials",
        }
    }
}

/// Vertex attribute locations consumed by the vertex stage.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexAttributeSlot {
    Position = 0,
    Normal = 1,
    UV = 2,
    Tangent = 3,
    Bitangent = 4,
}

impl VertexAttributeSlot {
    pub const ALL: [VertexAttributeSlot; 5] = [
        VertexAttributeSlot::Position,
        VertexAttributeSlot::Normal,
        VertexAttributeSlot::UV,
        VertexAttributeSlot::Tangent,
        VertexAttributeSlot::Bitangent,
    ];

    pub const fn location(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            VertexAttributeSlot::Position => "Position",
            VertexAttributeSlot::Normal => "Normal",
            VertexAttributeSlot::UV => "UV",
            VertexAttributeSlot::Tangent => "Tangent",
            VertexAttributeSlot::Bitangent => "Bitangent",
        }
    }
}

/// Fragment-stage sampler binding points.
///
/// Textures live in their own descriptor set, so these indices may overlap buffer slots.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    BaseColor = 0,
    Normal = 1,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 2] = [TextureSlot::BaseColor, TextureSlot::Normal];

    pub const fn index(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            TextureSlot::BaseColor => "BaseColor",
            TextureSlot::Normal => "Normal",
        }
    }
}

/// Descriptor set holding every buffer slot except `Vertices`.
pub const BUFFER_DESCRIPTOR_SET: u32 = 0;
/// Descriptor set holding the texture samplers.
pub const TEXTURE_DESCRIPTOR_SET: u32 = 1;

const fn pairwise_distinct(values: &[u32]) -> bool {
    let mut i = 0;
    while i < values.len() {
        let mut j = i + 1;
        while j < values.len() {
            if values[i] == values[j] {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn contiguous_from_zero(values: &[u32]) -> bool {
    let mut i = 0;
    while i < values.len() {
        if values[i] != i as u32 {
            return false;
        }
        i += 1;
    }
    true
}

const BUFFER_INDICES: [u32; 5] = [
    BufferSlot::Vertices.index(),
    BufferSlot::Uniforms.index(),
    BufferSlot::Lights.index(),
    BufferSlot::FragmentUniforms.index(),
    BufferSlot::Materials.index(),
];

const ATTRIBUTE_LOCATIONS: [u32; 5] = [
    VertexAttributeSlot::Position.location(),
    VertexAttributeSlot::Normal.location(),
    VertexAttributeSlot::UV.location(),
    VertexAttributeSlot::Tangent.location(),
    VertexAttributeSlot::Bitangent.location(),
];

const TEXTURE_INDICES: [u32; 2] = [TextureSlot::BaseColor.index(), TextureSlot::Normal.index()];

const _: () = assert!(pairwise_distinct(&BUFFER_INDICES));
const _: () = assert!(pairwise_distinct(&ATTRIBUTE_LOCATIONS));
const _: () = assert!(contiguous_from_zero(&ATTRIBUTE_LOCATIONS));
const _: () = assert!(pairwise_distinct(&TEXTURE_INDICES));

/// Descriptor set layout bindings for [`BUFFER_DESCRIPTOR_SET`].
pub fn buffer_layout_bindings() -> Vec<vk::DescriptorSetLayoutBinding<'static>> {
    BufferSlot::ALL
        .iter()
        .filter_map(|slot| {
            slot.descriptor().map(|(ty, stages)| {
                vk::DescriptorSetLayoutBinding::default()
                    .binding(slot.index())
                    .descriptor_type(ty)
                    .descriptor_count(1)
                    .stage_flags(stages)
            })
        })
        .collect()
}

/// Descriptor set layout bindings for [`TEXTURE_DESCRIPTOR_SET`].
pub fn texture_layout_bindings() -> [vk::DescriptorSetLayoutBinding<'static>; 2] {
    TextureSlot::ALL.map(|slot| {
        vk::DescriptorSetLayoutBinding::default()
            .binding(slot.index())
            .descriptor_type(vk::DescriptorType::COMBINED_IMAGE_SAMPLER)
            .descriptor_count(1)
            .stage_flags(vk::ShaderStageFlags::FRAGMENT)
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn buffer_slots_match_shader_bindings() {
        assert_eq!(BufferSlot::Vertices.index(), 0);
        assert_eq!(BufferSlot::Uniforms.index(), 11);
        assert_eq!(BufferSlot::Lights.index(), 12);
        assert_eq!(BufferSlot::FragmentUniforms.index(), 13);
        assert_eq!(BufferSlot::Materials.index(), 14);
    }

    #[test]
    fn slot_values_are_pairwise_distinct() {
        let buffers: HashSet<u32> = BufferSlot::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(buffers.len(), BufferSlot::ALL.len());

        let attributes: HashSet<u32> = VertexAttributeSlot::ALL
            .iter()
            .map(|s| s.location())
            .collect();
        assert_eq!(attributes.len(), VertexAttributeSlot::ALL.len());

        let textures: HashSet<u32> = TextureSlot::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(textures.len(), TextureSlot::ALL.len());
    }

    #[test]
    fn attribute_locations_are_contiguous() {
        let locations: Vec<u32> = VertexAttributeSlot::ALL
            .iter()
            .map(|s| s.location())
            .collect();
        assert_eq!(locations, (0..5).collect::<Vec<u32>>());
    }

    #[test]
    fn texture_slots_are_sequential() {
        assert_eq!(TextureSlot::BaseColor.index(), 0);
        assert_eq!(TextureSlot::Normal.index(), 1);
    }

    #[test]
    fn reserved_range_is_unused() {
        for slot in BufferSlot::ALL {
            assert!(!(1..=10).contains(&slot.index()), "{slot:?} uses a reserved index");
        }
    }

    #[test]
    fn buffer_bindings_skip_vertex_stream() {
        let bindings = buffer_layout_bindings();
        assert_eq!(bindings.len(), 4);
        let indices: Vec<u32> = bindings.iter().map(|b| b.binding).collect();
        assert_eq!(indices, vec![11, 12, 13, 14]);
        assert_eq!(bindings[0].stage_flags, vk::ShaderStageFlags::VERTEX);
        assert_eq!(bindings[1].descriptor_type, vk::DescriptorType::STORAGE_BUFFER);
    }

    #[test]
    fn texture_bindings_are_samplers() {
        let bindings = texture_layout_bindings();
        assert_eq!(bindings[0].binding, 0);
        assert_eq!(bindings[1].binding, 1);
        assert!(bindings
            .iter()
            .all(|b| b.descriptor_type == vk::DescriptorType::COMBINED_IMAGE_SAMPLER));
    }
}
