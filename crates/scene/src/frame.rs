use glam::Vec3;
use shading_contract::{upload, FragmentUniforms, LightArray, Material, Uniforms};

use crate::error::{Result, SceneError};
use crate::rig::LightRig;

pub const MAX_FRAMES_IN_FLIGHT: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    /// Safe to overwrite.
    Free,
    /// Acquired by the host and being filled.
    Recording,
    /// Submitted; the GPU may still be reading it.
    InFlight,
}

impl FrameState {
    fn name(self) -> &'static str {
        match self {
            FrameState::Free => "free",
            FrameState::Recording => "recording",
            FrameState::InFlight => "in flight",
        }
    }
}

/// Everything one frame uploads. Each in-flight frame owns its own copy.
#[derive(Clone, Debug)]
pub struct FrameData {
    fragment_uniforms: FragmentUniforms,
    lights: LightArray,
    uniforms: Vec<Uniforms>,
    materials: Vec<Material>,
    state: FrameState,
    serial: u64,
}

impl FrameData {
    fn new() -> Self {
        Self {
            fragment_uniforms: FragmentUniforms::default(),
            lights: LightArray::default(),
            uniforms: Vec::new(),
            materials: Vec::new(),
            state: FrameState::Free,
            serial: 0,
        }
    }

    fn reset(&mut self, serial: u64) {
        self.fragment_uniforms = FragmentUniforms::default();
        self.lights = LightArray::default();
        self.uniforms.clear();
        self.materials.clear();
        self.serial = serial;
    }

    /// Packs `rig` and sets a light count that matches it.
    pub fn set_lighting(&mut self, rig: &LightRig, camera_position: Vec3, tiling: u32) {
        self.lights = rig.pack();
        self.fragment_uniforms = self.lights.fragment_uniforms(camera_position, tiling);
    }

    /// Adds one draw; its uniforms and material share an index.
    pub fn push_draw(&mut self, uniforms: Uniforms, material: Material) -> usize {
        self.uniforms.push(uniforms);
        self.materials.push(material);
        self.uniforms.len() - 1
    }

    pub fn draw_count(&self) -> usize {
        self.uniforms.len()
    }

    pub fn fragment_uniforms(&self) -> &FragmentUniforms {
        &self.fragment_uniforms
    }

    pub fn lights(&self) -> &LightArray {
        &self.lights
    }

    pub fn uniforms(&self) -> &[Uniforms] {
        &self.uniforms
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Number of the acquire that filled this slot, starting at 1.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn fragment_uniforms_bytes(&self) -> &[u8] {
        upload::record_bytes(&self.fragment_uniforms)
    }

    pub fn lights_bytes(&self) -> &[u8] {
        self.lights.as_bytes()
    }

    pub fn uniforms_bytes(&self) -> &[u8] {
        upload::slice_bytes(&self.uniforms)
    }

    pub fn materials_bytes(&self) -> &[u8] {
        upload::slice_bytes(&self.materials)
    }
}

/// Ring of per-frame data so the host never rewrites records the GPU is still reading.
///
/// `acquire` hands out the next slot, `submit` marks it in flight, and `retire` frees it
/// once the frame's fence has signalled.
#[derive(Debug)]
pub struct FrameRing {
    frames: Vec<FrameData>,
    current: usize,
    serial: u64,
}

impl FrameRing {
    pub fn new() -> Self {
        Self::with_depth(MAX_FRAMES_IN_FLIGHT)
    }

    /// A depth of 0 is treated as 1.
    pub fn with_depth(depth: usize) -> Self {
        let depth = depth.max(1);
        Self {
            frames: (0..depth).map(|_| FrameData::new()).collect(),
            current: 0,
            serial: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Index of the slot the next `acquire` will return.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn acquire(&mut self) -> Result<(usize, &mut FrameData)> {
        let slot = self.current;
        let state = self.frames[slot].state;
        match state {
            FrameState::Free => {}
            FrameState::InFlight => {
                tracing::debug!("Frame slot {} still in flight, cannot acquire", slot);
                return Err(SceneError::FrameInFlight(slot));
            }
            FrameState::Recording => {
                return Err(SceneError::FrameState {
                    slot,
                    state: state.name(),
                    expected: FrameState::Free.name(),
                });
            }
        }

        self.serial += 1;
        let frame = &mut self.frames[slot];
        frame.reset(self.serial);
        frame.state = FrameState::Recording;
        Ok((slot, frame))
    }

    pub fn submit(&mut self, slot: usize) -> Result<()> {
        self.transition(slot, FrameState::Recording, FrameState::InFlight)?;
        self.current = (slot + 1) % self.frames.len();
        tracing::trace!("Submitted frame slot {}", slot);
        Ok(())
    }

    /// Call once the GPU has finished with the slot.
    pub fn retire(&mut self, slot: usize) -> Result<()> {
        self.transition(slot, FrameState::InFlight, FrameState::Free)?;
        tracing::trace!("Retired frame slot {}", slot);
        Ok(())
    }

    pub fn frame(&self, slot: usize) -> Result<&FrameData> {
        self.frames.get(slot).ok_or(SceneError::UnknownFrame(slot))
    }

    fn transition(&mut self, slot: usize, from: FrameState, to: FrameState) -> Result<()> {
        let frame = self
            .frames
            .get_mut(slot)
            .ok_or(SceneError::UnknownFrame(slot))?;
        if frame.state != from {
            return Err(SceneError::FrameState {
                slot,
                state: frame.state.name(),
                expected: from.name(),
            });
        }
        frame.state = to;
        Ok(())
    }
}

impl Default for FrameRing {
    fn default() -> Self {
        Self::new()
    }
}
