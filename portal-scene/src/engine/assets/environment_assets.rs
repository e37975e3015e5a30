use crate::engine::assets::node_roles::NodeRoles;
use bevy::gltf::Gltf;
use bevy::prelude::*;

/// Handles for the two environment loads issued once the manifest resolves.
#[derive(Resource, Debug, Clone)]
pub struct EnvironmentAssets {
    pub model: Handle<Gltf>,
    pub model_path: String,
    pub baked_texture: Handle<Image>,
    pub baked_texture_path: String,
}

/// Root of the spawned environment subtree.
#[derive(Component)]
pub struct EnvironmentRoot;

/// Every node of the integrated environment. Picking only considers these.
#[derive(Component)]
pub struct EnvironmentMember;

/// Animation graph waiting for the environment's animation player to spawn.
#[derive(Component, Debug, Clone)]
pub struct PendingAnimation {
    pub name: String,
    pub graph: Handle<AnimationGraph>,
    pub node: AnimationNodeIndex,
    pub repetitions: u32,
}

/// The integrated environment. Present only once integration finished.
#[derive(Resource, Debug, Clone)]
pub struct Environment {
    pub root: Entity,
    pub roles: NodeRoles,
}
