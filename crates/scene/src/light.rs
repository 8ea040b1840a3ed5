use glam::Vec3;
use shading_contract::{Light, LightType};

/// Colour and strength shared by every kind of light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emission {
    pub color: Vec3,
    pub specular_color: Vec3,
    pub intensity: f32,
}

impl Emission {
    pub fn new(color: Vec3, specular_color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            specular_color,
            intensity,
        }
    }

    /// Same emission with the specular highlight switched off.
    pub fn without_specular(self) -> Self {
        Self {
            specular_color: Vec3::ZERO,
            ..self
        }
    }

    pub fn with_color(self, color: Vec3) -> Self {
        Self { color, ..self }
    }

    pub fn with_intensity(self, intensity: f32) -> Self {
        Self { intensity, ..self }
    }
}

impl Default for Emission {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            specular_color: Vec3::ONE,
            intensity: 0.6,
        }
    }
}

/// Distance falloff: `1 / (constant + linear * d + quadratic * d^2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    /// No falloff.
    pub const NONE: Attenuation = Attenuation {
        constant: 1.0,
        linear: 0.0,
        quadratic: 0.0,
    };

    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    pub fn factor(&self, distance: f32) -> f32 {
        let denom = self.constant + self.linear * distance + self.quadratic * distance * distance;
        if denom <= 0.0 {
            return 0.0;
        }
        1.0 / denom
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<Attenuation> for Vec3 {
    fn from(a: Attenuation) -> Self {
        Vec3::new(a.constant, a.linear, a.quadratic)
    }
}

impl From<Vec3> for Attenuation {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cone {
    /// Half-angle in radians.
    pub angle: f32,
    pub direction: Vec3,
    pub attenuation: f32,
}

/// A light as host code describes it. Converted to the flat [`Light`] record only when
/// the light array is packed for upload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightSource {
    /// Directional light; `position` is where the light comes from.
    Sun { position: Vec3, emission: Emission },
    Spot {
        position: Vec3,
        attenuation: Attenuation,
        cone: Cone,
        emission: Emission,
    },
    Point {
        position: Vec3,
        attenuation: Attenuation,
        emission: Emission,
    },
    Ambient { emission: Emission },
}

impl LightSource {
    pub fn light_type(&self) -> LightType {
        match self {
            LightSource::Sun { .. } => LightType::Sun,
            LightSource::Spot { .. } => LightType::Spot,
            LightSource::Point { .. } => LightType::Point,
            LightSource::Ambient { .. } => LightType::Ambient,
        }
    }

    pub fn emission(&self) -> &Emission {
        match self {
            LightSource::Sun { emission, .. }
            | LightSource::Spot { emission, .. }
            | LightSource::Point { emission, .. }
            | LightSource::Ambient { emission } => emission,
        }
    }

    /// Inverse of the upload conversion. `Unused` entries have no source.
    pub fn from_gpu(light: &Light) -> Option<Self> {
        let emission = Emission::new(light.color, light.specular_color, light.intensity);
        match light.light_type {
            LightType::Unused => None,
            LightType::Sun => Some(LightSource::Sun {
                position: light.position,
                emission,
            }),
            LightType::Spot => Some(LightSource::Spot {
                position: light.position,
                attenuation: light.attenuation.into(),
                cone: Cone {
                    angle: light.cone_angle,
                    direction: light.cone_direction,
                    attenuation: light.cone_attenuation,
                },
                emission,
            }),
            LightType::Point => Some(LightSource::Point {
                position: light.position,
                attenuation: light.attenuation.into(),
                emission,
            }),
            LightType::Ambient => Some(LightSource::Ambient { emission }),
        }
    }
}

impl From<&LightSource> for Light {
    fn from(source: &LightSource) -> Self {
        let emission = source.emission();
        let mut light = Light {
            color: emission.color,
            specular_color: emission.specular_color,
            intensity: emission.intensity,
            attenuation: Attenuation::NONE.into(),
            light_type: source.light_type(),
            ..Light::UNUSED
        };

        match *source {
            LightSource::Sun { position, .. } => {
                light.position = position;
            }
            LightSource::Spot {
                position,
                attenuation,
                cone,
                ..
            } => {
                light.position = position;
                light.attenuation = attenuation.into();
                light.cone_angle = cone.angle;
                light.cone_direction = cone.direction;
                light.cone_attenuation = cone.attenuation;
            }
            LightSource::Point {
                position,
                attenuation,
                ..
            } => {
                light.position = position;
                light.attenuation = attenuation.into();
            }
            LightSource::Ambient { .. } => {}
        }

        light
    }
}

impl From<LightSource> for Light {
    fn from(source: LightSource) -> Self {
        Light::from(&source)
    }
}
