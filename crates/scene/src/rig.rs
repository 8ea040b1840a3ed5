use glam::Vec3;
use shading_contract::{FragmentUniforms, Light, LightArray, MAX_LIGHTS};

use crate::error::Result;
use crate::light::{Attenuation, Cone, Emission, LightSource};

/// The lights of a scene, in upload order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LightRig {
    sources: Vec<LightSource>,
}

impl LightRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The model viewer's stock lighting: key sun, dim fill, ambient, a red point light
    /// and a magenta spotlight.
    pub fn viewer_default() -> Self {
        let base = Emission::default();

        let sunlight = LightSource::Sun {
            position: Vec3::new(-0.4, -20.5, 2.0),
            emission: base.without_specular(),
        };
        let fill_light = LightSource::Sun {
            position: Vec3::new(0.0, 20.0, 0.4),
            emission: base
                .without_specular()
                .with_color(Vec3::new(0.4, 0.4, 0.0)),
        };
        let ambient_light = LightSource::Ambient {
            emission: base.with_intensity(0.2),
        };
        let red_light = LightSource::Point {
            position: Vec3::new(0.0, 7.0, 0.0),
            attenuation: Attenuation::new(0.5, 1.5, 2.5),
            emission: base.with_color(Vec3::X),
        };
        let spotlight = LightSource::Spot {
            position: Vec3::new(0.0, -20.0, 0.0),
            attenuation: Attenuation::new(1.0, 0.5, 0.0),
            cone: Cone {
                angle: 20f32.to_radians(),
                direction: Vec3::new(0.0, 10.0, 0.0),
                attenuation: 1.0,
            },
            emission: base.with_color(Vec3::new(1.0, 0.0, 1.0)),
        };

        Self {
            sources: vec![sunlight, fill_light, ambient_light, red_light, spotlight],
        }
    }

    pub fn push(&mut self, source: LightSource) -> &mut Self {
        if self.sources.len() == MAX_LIGHTS {
            tracing::warn!(
                "Light rig now exceeds the shader light array ({} entries); extra lights will be dropped on upload",
                MAX_LIGHTS
            );
        }
        self.sources.push(source);
        self
    }

    pub fn sources(&self) -> &[LightSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }

    fn flatten(&self) -> Vec<Light> {
        self.sources.iter().map(Light::from).collect()
    }

    /// Packs the rig for upload, dropping lights past [`MAX_LIGHTS`].
    pub fn pack(&self) -> LightArray {
        if self.sources.len() > MAX_LIGHTS {
            tracing::warn!(
                "Clamping light count from {} to {}",
                self.sources.len(),
                MAX_LIGHTS
            );
        }
        let array = LightArray::truncated(&self.flatten());
        tracing::debug!("Packed {} lights for upload", array.count());
        array
    }

    /// Packs the rig for upload, failing when it does not fit.
    pub fn try_pack(&self) -> Result<LightArray> {
        Ok(LightArray::from_slice(&self.flatten())?)
    }

    /// Fragment uniforms whose light count matches [`LightRig::pack`].
    pub fn fragment_uniforms(&self, camera_position: Vec3, tiling: u32) -> FragmentUniforms {
        FragmentUniforms::new(self.sources.len() as u32, camera_position, tiling)
    }
}

impl FromIterator<LightSource> for LightRig {
    fn from_iter<I: IntoIterator<Item = LightSource>>(iter: I) -> Self {
        Self {
            sources: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use shading_contract::LightType;

    use super::*;
    use crate::SceneError;

    #[test]
    fn viewer_default_matches_stock_lighting() {
        let rig = LightRig::viewer_default();
        let packed = rig.pack();
        assert_eq!(packed.count(), 5);

        let types: Vec<LightType> = packed.active().iter().map(|l| l.light_type).collect();
        assert_eq!(
            types,
            vec![
                LightType::Sun,
                LightType::Sun,
                LightType::Ambient,
                LightType::Point,
                LightType::Spot
            ]
        );

        let sun = &packed.active()[0];
        assert_eq!(sun.position, Vec3::new(-0.4, -20.5, 2.0));
        assert_eq!(sun.specular_color, Vec3::ZERO);
        assert_eq!(sun.intensity, 0.6);

        let red = &packed.active()[3];
        assert_eq!(red.attenuation, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(red.specular_color, Vec3::ONE);
    }

    #[test]
    fn fragment_uniforms_count_matches_pack() {
        let rig = LightRig::viewer_default();
        let uniforms = rig.fragment_uniforms(Vec3::new(0.0, 8.7, -49.2), 1);
        assert_eq!(uniforms.light_count, rig.pack().count());
    }

    #[test]
    fn oversized_rig_is_clamped_or_rejected() {
        let ambient = LightSource::Ambient {
            emission: Emission::default(),
        };
        let rig: LightRig = std::iter::repeat(ambient).take(MAX_LIGHTS + 2).collect();

        assert_eq!(rig.pack().count() as usize, MAX_LIGHTS);
        assert_eq!(
            rig.fragment_uniforms(Vec3::ZERO, 1).light_count as usize,
            MAX_LIGHTS
        );
        assert!(matches!(rig.try_pack(), Err(SceneError::ContractError(_))));
    }

    #[test]
    fn push_and_clear() {
        let mut rig = LightRig::new();
        assert!(rig.is_empty());
        rig.push(LightSource::Ambient {
            emission: Emission::default(),
        });
        assert_eq!(rig.len(), 1);
        rig.clear();
        assert!(rig.pack().is_empty());
    }
}
