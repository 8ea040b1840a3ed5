//! Host-side producers of the shading contract records: light sources and rigs, object
//! transforms, and the per-frame ring the records are written into.

mod error;
pub mod frame;
pub mod light;
pub mod rig;
pub mod transform;

pub use error::{Result, SceneError};
pub use frame::{FrameData, FrameRing, FrameState, MAX_FRAMES_IN_FLIGHT};
pub use light::{Attenuation, Cone, Emission, LightSource};
pub use rig::LightRig;
pub use transform::Transform;
