use ash::vk;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use std::mem::size_of;

use crate::slots::{BufferSlot, VertexAttributeSlot};

/// Interleaved vertex consumed through [`BufferSlot::Vertices`].
///
/// Vertex fetch reads tightly packed attributes, so unlike the uniform records no `Vec3`
/// is padded here.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

const _: () = assert!(size_of::<Vertex>() == 56);

impl Vertex {
    pub fn get_binding_description() -> vk::VertexInputBindingDescription {
        vk::VertexInputBindingDescription::default()
            .binding(BufferSlot::Vertices.index())
            .stride(size_of::<Self>() as u32)
            .input_rate(vk::VertexInputRate::VERTEX)
    }

    pub fn get_attribute_descriptions() -> [vk::VertexInputAttributeDescription; 5] {
        VertexAttributeSlot::ALL.map(|slot| {
            let (format, offset) = match slot {
                VertexAttributeSlot::Position => (
                    vk::Format::R32G32B32_SFLOAT,
                    memoffset::offset_of!(Vertex, position),
                ),
                VertexAttributeSlot::Normal => (
                    vk::Format::R32G32B32_SFLOAT,
                    memoffset::offset_of!(Vertex, normal),
                ),
                VertexAttributeSlot::UV => {
                    (vk::Format::R32G32_SFLOAT, memoffset::offset_of!(Vertex, uv))
                }
                VertexAttributeSlot::Tangent => (
                    vk::Format::R32G32B32_SFLOAT,
                    memoffset::offset_of!(Vertex, tangent),
                ),
                VertexAttributeSlot::Bitangent => (
                    vk::Format::R32G32B32_SFLOAT,
                    memoffset::offset_of!(Vertex, bitangent),
                ),
            };

            vk::VertexInputAttributeDescription::default()
                .location(slot.location())
                .binding(BufferSlot::Vertices.index())
                .format(format)
                .offset(offset as u32)
        })
    }
}
