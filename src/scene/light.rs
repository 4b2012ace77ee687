use nalgebra::Vector3;
use std::fmt;
use std::str::FromStr;

/// The selectable directional light setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightPreset {
    #[default]
    Front,
    Right,
    Left,
    Top,
    Bottom,
}

impl LightPreset {
    pub const ALL: [LightPreset; 5] = [
        LightPreset::Front,
        LightPreset::Right,
        LightPreset::Left,
        LightPreset::Top,
        LightPreset::Bottom,
    ];

    /// Unit direction used in the diffuse term.
    pub fn direction(self) -> Vector3<f32> {
        let raw = match self {
            LightPreset::Front => Vector3::new(0.5, -0.3, 1.0),
            LightPreset::Right => Vector3::new(1.0, 0.0, 0.5),
            LightPreset::Left => Vector3::new(-1.0, 0.0, 0.5),
            LightPreset::Top => Vector3::new(0.0, 1.0, 0.5),
            LightPreset::Bottom => Vector3::new(0.0, -1.0, 0.5),
        };
        raw.normalize()
    }

    pub fn name(self) -> &'static str {
        match self {
            LightPreset::Front => "front",
            LightPreset::Right => "right",
            LightPreset::Left => "left",
            LightPreset::Top => "top",
            LightPreset::Bottom => "bottom",
        }
    }
}

impl fmt::Display for LightPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LightPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LightPreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown light preset '{}'", s))
    }
}

/// A single directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub preset: LightPreset,
    /// Always unit length.
    pub direction: Vector3<f32>,
}

impl DirectionalLight {
    pub fn from_preset(preset: LightPreset) -> Self {
        Self {
            preset,
            direction: preset.direction(),
        }
    }

    pub fn select(&mut self, preset: LightPreset) {
        *self = Self::from_preset(preset);
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::from_preset(LightPreset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn preset_directions_are_unit_length() {
        for preset in LightPreset::ALL {
            assert_relative_eq!(preset.direction().norm(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn presets_round_trip_through_names() {
        for preset in LightPreset::ALL {
            assert_eq!(preset.name().parse::<LightPreset>(), Ok(preset));
        }
        assert_eq!(" TOP ".parse::<LightPreset>(), Ok(LightPreset::Top));
        assert!("sideways".parse::<LightPreset>().is_err());
    }

    #[test]
    fn select_replaces_direction() {
        let mut light = DirectionalLight::default();
        light.select(LightPreset::Left);
        assert_eq!(light.preset, LightPreset::Left);
        assert_relative_eq!(light.direction, Vector3::new(-1.0, 0.0, 0.5).normalize());
    }
}
