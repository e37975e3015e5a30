use crate::engine::assets::material_registry::hex_colour;
use bevy::prelude::*;
use constants::render_settings::PLACEHOLDER_COLOUR;

/// Stand-in geometry shown when the environment could not be loaded.
#[derive(Component)]
pub struct EnvironmentPlaceholder;

pub fn spawn_placeholder(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let material = materials.add(StandardMaterial {
        base_color: hex_colour(PLACEHOLDER_COLOUR),
        unlit: true,
        ..default()
    });

    commands.spawn((
        Name::new("environment placeholder ground"),
        EnvironmentPlaceholder,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(4.0, 4.0))),
        MeshMaterial3d(material.clone()),
        Transform::default(),
    ));

    commands.spawn((
        Name::new("environment placeholder portal"),
        EnvironmentPlaceholder,
        Mesh3d(meshes.add(Torus::new(0.6, 0.75))),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, 0.8, -1.0)
            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
    ));

    warn!("Environment unavailable, placeholder geometry shown");
}
