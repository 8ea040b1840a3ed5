//! Memory layout shared between host code and the shader programs.
//!
//! Padding convention: a `vec3` occupies a 16-byte slot, a `mat3` is three 16-byte
//! columns, and every record's size is a multiple of 16. All padding is written out as
//! `_paddingN` fields so each record can be uploaded with `bytemuck` as-is.

pub mod error;
pub mod fragment;
pub mod glsl;
pub mod layout;
pub mod light;
pub mod material;
pub mod slots;
pub mod uniforms;
pub mod upload;
pub mod vertex;

pub use error::*;
pub use fragment::*;
pub use layout::{FieldKind, FieldLayout, GpuRecord, RecordLayout};
pub use light::*;
pub use material::*;
pub use slots::*;
pub use uniforms::*;
pub use vertex::*;
