use glam::{Mat4, Vec3};
use shading_contract::Uniforms;

/// Position, Euler rotation (radians, applied X then Y then Z) and scale of an object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_rotation(self, rotation: Vec3) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_scale(self, scale: Vec3) -> Self {
        Self { scale, ..self }
    }

    /// `T * Rx * Ry * Rz * S`
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale)
    }

    /// Per-draw uniforms for this object seen through `view` and `projection`.
    pub fn uniforms(&self, view: Mat4, projection: Mat4) -> Uniforms {
        Uniforms::new(self.model_matrix(), view, projection)
    }
}
