use crate::engine::camera::orbit_camera::SceneCamera;
use crate::engine::scene::lighting::{SceneLight, light_transform, shadow_depth_bias};
use crate::engine::scene::particles::FireflyLayer;
use crate::engine::shaders::FireflyMaterial;
use crate::error::SceneError;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::pbr::ShadowFilteringMethod;
use bevy::prelude::*;
use constants::debug_controls::{
    ControlRange, DEFAULT_CLEAR_COLOUR, DEFAULT_LIGHT_POSITION, DEFAULT_SHADOW_BIAS,
    DEFAULT_SHADOW_BLUR, LIGHT_X_RANGE, LIGHT_Y_RANGE, LIGHT_Z_RANGE, PANEL_VISIBLE_BY_DEFAULT,
    PARTICLE_SIZE_RANGE, SHADOW_BIAS_RANGE, SHADOW_BLUR_RANGE,
};
use constants::particles::DEFAULT_SIZE;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Numeric developer controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugParam {
    ParticleSize,
    ShadowBias,
    ShadowBlur,
    LightX,
    LightY,
    LightZ,
}

impl DebugParam {
    pub const ALL: [DebugParam; 6] = [
        DebugParam::ParticleSize,
        DebugParam::ShadowBias,
        DebugParam::ShadowBlur,
        DebugParam::LightX,
        DebugParam::LightY,
        DebugParam::LightZ,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DebugParam::ParticleSize => "particle_size",
            DebugParam::ShadowBias => "shadow_bias",
            DebugParam::ShadowBlur => "shadow_blur",
            DebugParam::LightX => "light_x",
            DebugParam::LightY => "light_y",
            DebugParam::LightZ => "light_z",
        }
    }

    pub fn range(self) -> ControlRange {
        match self {
            DebugParam::ParticleSize => PARTICLE_SIZE_RANGE,
            DebugParam::ShadowBias => SHADOW_BIAS_RANGE,
            DebugParam::ShadowBlur => SHADOW_BLUR_RANGE,
            DebugParam::LightX => LIGHT_X_RANGE,
            DebugParam::LightY => LIGHT_Y_RANGE,
            DebugParam::LightZ => LIGHT_Z_RANGE,
        }
    }
}

impl FromStr for DebugParam {
    type Err = SceneError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        DebugParam::ALL
            .into_iter()
            .find(|param| param.name() == name)
            .ok_or_else(|| SceneError::UnknownDebugParam(name.to_string()))
    }
}

/// Developer-only scene settings; nothing is persisted.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DebugSettings {
    pub panel_visible: bool,
    pub clear_colour: String,
    pub particle_size: f32,
    pub shadow_bias: f32,
    pub shadow_blur: f32,
    pub light_position: Vec3,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            panel_visible: PANEL_VISIBLE_BY_DEFAULT,
            clear_colour: DEFAULT_CLEAR_COLOUR.to_string(),
            particle_size: DEFAULT_SIZE,
            shadow_bias: DEFAULT_SHADOW_BIAS,
            shadow_blur: DEFAULT_SHADOW_BLUR,
            light_position: Vec3::from_array(DEFAULT_LIGHT_POSITION),
        }
    }
}

impl DebugSettings {
    pub fn get(&self, param: DebugParam) -> f32 {
        match param {
            DebugParam::ParticleSize => self.particle_size,
            DebugParam::ShadowBias => self.shadow_bias,
            DebugParam::ShadowBlur => self.shadow_blur,
            DebugParam::LightX => self.light_position.x,
            DebugParam::LightY => self.light_position.y,
            DebugParam::LightZ => self.light_position.z,
        }
    }

    /// Store `value` clamped into the parameter's range; returns what was stored.
    pub fn set(&mut self, param: DebugParam, value: f32) -> f32 {
        let value = param.range().clamp(value);
        let slot = match param {
            DebugParam::ParticleSize => &mut self.particle_size,
            DebugParam::ShadowBias => &mut self.shadow_bias,
            DebugParam::ShadowBlur => &mut self.shadow_blur,
            DebugParam::LightX => &mut self.light_position.x,
            DebugParam::LightY => &mut self.light_position.y,
            DebugParam::LightZ => &mut self.light_position.z,
        };
        *slot = value;
        value
    }

    /// Move a parameter by whole steps of its range.
    pub fn nudge(&mut self, param: DebugParam, steps: f32) -> f32 {
        self.set(param, self.get(param) + steps * param.range().step)
    }

    pub fn set_clear_colour(&mut self, hex: &str) -> Result<(), SceneError> {
        Srgba::hex(hex).map_err(|_| SceneError::InvalidColour(hex.to_string()))?;
        self.clear_colour = hex.to_string();
        Ok(())
    }

    pub fn clear_colour(&self) -> Color {
        Srgba::hex(&self.clear_colour)
            .map(Color::from)
            .unwrap_or(Color::BLACK)
    }

    /// Hardware PCF for sharp shadows, a wider gaussian kernel once blurred.
    pub fn shadow_filtering(&self) -> ShadowFilteringMethod {
        if self.shadow_blur < 1.0 {
            ShadowFilteringMethod::Hardware2x2
        } else {
            ShadowFilteringMethod::Gaussian
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut values = serde_json::Map::new();
        values.insert("panel_visible".into(), self.panel_visible.into());
        values.insert("clear_colour".into(), self.clear_colour.clone().into());
        for param in DebugParam::ALL {
            values.insert(param.name().into(), self.get(param).into());
        }
        serde_json::Value::Object(values)
    }
}

// Push changed settings into the clear colour, light, shadow filtering and particles
pub fn apply_debug_settings(
    settings: Res<DebugSettings>,
    mut clear_colour: ResMut<ClearColor>,
    mut lights: Query<(&mut DirectionalLight, &mut Transform), With<SceneLight>>,
    mut cameras: Query<&mut ShadowFilteringMethod, With<SceneCamera>>,
    layer: Option<Res<FireflyLayer>>,
    mut materials: ResMut<Assets<FireflyMaterial>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !settings.is_changed() {
        return;
    }

    clear_colour.0 = settings.clear_colour();

    for (mut light, mut transform) in &mut lights {
        light.shadow_depth_bias = shadow_depth_bias(settings.shadow_bias);
        *transform = light_transform(settings.light_position);
    }

    for mut filtering in &mut cameras {
        *filtering = settings.shadow_filtering();
    }

    if let Some(material) = layer.and_then(|layer| materials.get_mut(&layer.material)) {
        material.uniform.size = settings.particle_size;
    }

    if !settings.is_added() {
        rpc_interface.send_notification("debug_settings_changed", settings.to_json());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_panel_defaults() {
        let settings = DebugSettings::default();

        assert!(!settings.panel_visible);
        assert_eq!(settings.clear_colour, "#201919");
        assert_eq!(settings.particle_size, 100.0);
        assert_eq!(settings.light_position, Vec3::new(3.0, 6.0, 2.0));
    }

    #[test]
    fn set_clamps_into_range() {
        let mut settings = DebugSettings::default();

        assert_eq!(settings.set(DebugParam::ParticleSize, 900.0), 500.0);
        assert_eq!(settings.set(DebugParam::ShadowBias, -1.0), -0.01);
        assert_eq!(settings.set(DebugParam::LightY, 45.0), 45.0);
        assert_eq!(settings.set(DebugParam::LightZ, -30.0), -20.0);
        assert_eq!(settings.light_position, Vec3::new(3.0, 45.0, -20.0));
    }

    #[test]
    fn nudge_moves_by_steps() {
        let mut settings = DebugSettings::default();

        settings.nudge(DebugParam::ShadowBlur, 3.0);
        assert_relative_eq!(settings.shadow_blur, 1.3, epsilon = 1e-5);

        settings.nudge(DebugParam::ParticleSize, -1.0);
        assert_eq!(settings.particle_size, 99.0);
    }

    #[test]
    fn params_parse_by_name() {
        assert_eq!("light_x".parse::<DebugParam>(), Ok(DebugParam::LightX));
        assert_eq!(
            "fog".parse::<DebugParam>(),
            Err(SceneError::UnknownDebugParam("fog".to_string()))
        );
    }

    #[test]
    fn invalid_clear_colour_is_rejected() {
        let mut settings = DebugSettings::default();

        assert!(settings.set_clear_colour("#102030").is_ok());
        assert_eq!(
            settings.set_clear_colour("teal-ish"),
            Err(SceneError::InvalidColour("teal-ish".to_string()))
        );
        assert_eq!(settings.clear_colour, "#102030");
    }

    #[test]
    fn blur_selects_filtering() {
        let mut settings = DebugSettings::default();
        assert_eq!(settings.shadow_filtering(), ShadowFilteringMethod::Gaussian);

        settings.set(DebugParam::ShadowBlur, 0.0);
        assert_eq!(settings.shadow_filtering(), ShadowFilteringMethod::Hardware2x2);
    }

    #[test]
    fn json_lists_every_param() {
        let json = DebugSettings::default().to_json();

        for param in DebugParam::ALL {
            assert!(json.get(param.name()).is_some(), "{} missing", param.name());
        }
        assert_eq!(json["clear_colour"], "#201919");
    }
}
