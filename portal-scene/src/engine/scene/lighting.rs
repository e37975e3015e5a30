use crate::engine::systems::debug_settings::DebugSettings;
use bevy::prelude::*;
use constants::render_settings::SCENE_LIGHT_ILLUMINANCE;

/// The single shadow-casting light; the environment's own lighting is baked.
#[derive(Component)]
pub struct SceneLight;

/// Light placed at `position`, aimed at the scene origin.
pub fn light_transform(position: Vec3) -> Transform {
    Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y)
}

/// Depth bias on top of the engine default; the adjustable bias is a small offset.
pub fn shadow_depth_bias(bias: f32) -> f32 {
    DirectionalLight::DEFAULT_SHADOW_DEPTH_BIAS + bias
}

pub fn spawn_scene_light(commands: &mut Commands, settings: &DebugSettings) {
    commands.spawn((
        Name::new("scene light"),
        SceneLight,
        DirectionalLight {
            illuminance: SCENE_LIGHT_ILLUMINANCE,
            shadows_enabled: true,
            shadow_depth_bias: shadow_depth_bias(settings.shadow_bias),
            ..default()
        },
        light_transform(settings.light_position),
    ));
}
