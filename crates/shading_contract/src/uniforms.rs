use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

/// A 3x3 matrix stored as three 16-byte columns, the shader-side `mat3` layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PaddedMat3 {
    pub x_axis: Vec3,
    pub _padding0: f32,
    pub y_axis: Vec3,
    pub _padding1: f32,
    pub z_axis: Vec3,
    pub _padding2: f32,
}

const _: () = assert!(std::mem::size_of::<PaddedMat3>() == 48);

impl From<Mat3> for PaddedMat3 {
    fn from(m: Mat3) -> Self {
        Self {
            x_axis: m.x_axis,
            y_axis: m.y_axis,
            z_axis: m.z_axis,
            ..Zeroable::zeroed()
        }
    }
}

impl From<PaddedMat3> for Mat3 {
    fn from(m: PaddedMat3) -> Self {
        Mat3::from_cols(m.x_axis, m.y_axis, m.z_axis)
    }
}

/// Per-draw transform state bound at [`BufferSlot::Uniforms`].
///
/// Fields are crate-private: the normal matrix is derived from the model matrix every time it
/// is set and cannot be written on its own.
///
/// [`BufferSlot::Uniforms`]: crate::BufferSlot::Uniforms
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub(crate) model_matrix: Mat4,
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
    pub(crate) normal_matrix: PaddedMat3,
}

const _: () = assert!(std::mem::size_of::<Uniforms>() == 240);

impl Uniforms {
    pub fn new(model: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            model_matrix: model,
            view_matrix: view,
            projection_matrix: projection,
            normal_matrix: normal_matrix(model).into(),
        }
    }

    pub fn set_model_matrix(&mut self, model: Mat4) {
        self.model_matrix = model;
        self.normal_matrix = normal_matrix(model).into();
    }

    pub fn set_view_matrix(&mut self, view: Mat4) {
        self.view_matrix = view;
    }

    pub fn set_projection_matrix(&mut self, projection: Mat4) {
        self.projection_matrix = projection;
    }

    /// Same camera, different object.
    pub fn with_model_matrix(mut self, model: Mat4) -> Self {
        self.set_model_matrix(model);
        self
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    pub fn normal_matrix(&self) -> Mat3 {
        self.normal_matrix.into()
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

/// Inverse-transpose of the upper-left 3x3 block of `model`.
///
/// A singular block (zero scale on some axis) has no inverse; the upper-left block itself
/// is returned instead so normals stay finite. Singularity is judged relative to the
/// column lengths, so small but invertible scales still get a true inverse-transpose.
pub fn normal_matrix(model: Mat4) -> Mat3 {
    let upper_left = Mat3::from_mat4(model);
    let scale =
        upper_left.x_axis.length() * upper_left.y_axis.length() * upper_left.z_axis.length();
    if upper_left.determinant().abs() <= f32::EPSILON * scale {
        return upper_left;
    }

    let normal = upper_left.inverse().transpose();
    if !normal.is_finite() {
        return upper_left;
    }
    normal
}

/// Transforms a normal by `normal_matrix` and renormalises it.
pub fn transform_normal(normal_matrix: Mat3, normal: Vec3) -> Vec3 {
    (normal_matrix * normal).normalize_or_zero()
}
