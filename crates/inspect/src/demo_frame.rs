use core::f32;

use glam::{Mat4, Vec2, Vec3};
use scene::{FrameRing, LightRig, Transform};
use shading_contract::{Material, MaterialDescBuilder, Vertex};

// Stock viewer camera: orbiting the origin at this distance, tilted down 10 degrees.
const CAMERA_DISTANCE: f32 = 50.0;
const CAMERA_PITCH_DEGREES: f32 = 10.0;
const CAMERA_FOV_DEGREES: f32 = 90.0;
const CAMERA_NEAR: f32 = 0.001;
const CAMERA_FAR: f32 = 200.0;

/// UV sphere. `sectors` is raised to at least 3 and `stacks` to at least 2.
pub fn create_sphere(radius: f32, sectors: u32, stacks: u32) -> (Vec<Vertex>, Vec<u32>) {
    let sectors = sectors.max(3);
    let stacks = stacks.max(2);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let sector_step = 2.0 * f32::consts::PI / sectors as f32;
    let stack_step = f32::consts::PI / stacks as f32;

    for i in 0..=stacks {
        let stack_angle = f32::consts::PI / 2.0 - (i as f32 * stack_step);
        let xy = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();

        for j in 0..=sectors {
            let sector_angle = j as f32 * sector_step;
            let position = Vec3::new(xy * sector_angle.cos(), xy * sector_angle.sin(), z);
            let normal = position.normalize_or_zero();
            let tangent = Vec3::new(-sector_angle.sin(), sector_angle.cos(), 0.0);
            vertices.push(Vertex {
                position,
                normal,
                uv: Vec2::new(j as f32 / sectors as f32, i as f32 / stacks as f32),
                tangent,
                bitangent: normal.cross(tangent),
            });
        }
    }

    for i in 0..stacks {
        let k1 = i * (sectors + 1);
        let k2 = k1 + sectors + 1;

        for j in 0..sectors {
            if i != 0 {
                indices.push(k1 + j);
                indices.push(k2 + j);
                indices.push(k1 + j + 1);
            }
            if i != (stacks - 1) {
                indices.push(k1 + j + 1);
                indices.push(k2 + j);
                indices.push(k2 + j + 1);
            }
        }
    }

    (vertices, indices)
}

pub fn camera_position() -> Vec3 {
    let pitch = CAMERA_PITCH_DEGREES.to_radians();
    Vec3::new(
        0.0,
        CAMERA_DISTANCE * pitch.sin(),
        -CAMERA_DISTANCE * pitch.cos(),
    )
}

/// View and Vulkan-style projection for the stock camera.
pub fn camera_matrices(aspect: f32) -> (Mat4, Mat4) {
    let view = Mat4::look_at_rh(camera_position(), Vec3::ZERO, Vec3::Y);

    let mut proj = Mat4::perspective_rh(
        CAMERA_FOV_DEGREES.to_radians(),
        aspect,
        CAMERA_NEAR,
        CAMERA_FAR,
    );

    proj.y_axis.y *= -1.0;

    (view, proj)
}

pub fn demo_materials() -> Vec<Material> {
    let plain = Material::default();
    let red = MaterialDescBuilder::default()
        .base_color(Vec3::new(1.0, 0.0, 0.0))
        .roughness(0.5)
        .build()
        .map(Material::from)
        .unwrap_or(plain);
    vec![plain, red]
}

/// Fills one frame of `ring` with the stock lighting and one draw per material, placed
/// side by side. Returns the slot used.
pub fn record_demo_frame(
    ring: &mut FrameRing,
    aspect: f32,
    tiling: u32,
) -> scene::Result<usize> {
    let (view, proj) = camera_matrices(aspect);
    let rig = LightRig::viewer_default();
    let materials = demo_materials();

    let (slot, frame) = ring.acquire()?;
    frame.set_lighting(&rig, camera_position(), tiling);

    let spacing = 12.0;
    let offset = spacing * (materials.len() as f32 - 1.0) / 2.0;
    for (i, material) in materials.into_iter().enumerate() {
        let position = Vec3::new(i as f32 * spacing - offset, 0.0, 0.0);
        let transform = Transform::from_position(position).with_scale(Vec3::new(1.0, 1.5, 1.0));
        let index = frame.push_draw(transform.uniforms(view, proj), material);
        tracing::debug!("Recorded draw {} at {:?}", index, transform.position);
    }

    Ok(slot)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use scene::FrameState;

    use super::*;

    #[test]
    fn sphere_vertices_lie_on_radius_with_orthonormal_frame() {
        let (vertices, indices) = create_sphere(2.0, 8, 6);
        assert_eq!(vertices.len(), 9 * 7);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        assert_eq!(indices.len() % 3, 0);

        for v in &vertices {
            assert_relative_eq!(v.position.length(), 2.0, epsilon = 1e-4);
            assert!(v.normal.dot(v.tangent).abs() < 1e-4);
        }
    }

    #[test]
    fn degenerate_sphere_arguments_are_raised() {
        let (vertices, indices) = create_sphere(1.0, 0, 0);
        assert_eq!(vertices.len(), 4 * 3);
        assert!(!indices.is_empty());
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        assert!(vertices.iter().all(|v| v.position.is_finite() && v.uv.is_finite()));
    }

    #[test]
    fn demo_frame_is_in_flight_with_stock_lights() {
        let mut ring = FrameRing::new();
        let slot = record_demo_frame(&mut ring, 16.0 / 9.0, 1).unwrap();
        ring.submit(slot).unwrap();

        let frame = ring.frame(slot).unwrap();
        assert_eq!(frame.state(), FrameState::InFlight);
        assert_eq!(frame.fragment_uniforms().light_count, 5);
        assert_eq!(frame.draw_count(), 2);
        assert_eq!(frame.materials()[1].base_color, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(frame.fragment_uniforms().camera_position, camera_position());
    }
}
