use crate::engine::assets::environment_assets::{Environment, EnvironmentMember, PendingAnimation};
use crate::engine::assets::material_registry::MaterialRegistry;
use crate::engine::assets::node_roles::{NodeMatcher, NodeRole, NodeRoles};
use crate::engine::assets::scene_manifest::{ActiveScene, MaterialPass};
use crate::engine::core::app_state::AppState;
use crate::error::SceneError;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::interaction::state::{AnimationRegistry, PlaybackHandle};
use bevy::ecs::system::SystemParam;
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use std::collections::HashSet;

/// Everything needed to turn a freshly spawned environment subtree into the
/// configured scene.
#[derive(SystemParam)]
pub struct EnvironmentIntegration<'w, 's> {
    commands: Commands<'w, 's>,
    children: Query<'w, 's, &'static Children>,
    names: Query<'w, 's, &'static Name>,
    mesh_nodes: Query<'w, 's, (), With<MeshMaterial3d<StandardMaterial>>>,
    players: Query<'w, 's, (), With<AnimationPlayer>>,
    pending_animations: Query<'w, 's, &'static PendingAnimation>,
    registry: Res<'w, MaterialRegistry>,
    scene: Res<'w, ActiveScene>,
    animations: ResMut<'w, AnimationRegistry>,
}

/// Outcome of integrating one environment subtree.
#[derive(Debug, Clone)]
pub struct IntegrationReport {
    pub roles: NodeRoles,
    pub missing: Vec<SceneError>,
    pub animation: Option<String>,
}

impl EnvironmentIntegration<'_, '_> {
    /// Assign materials and shadow flags, resolve roles, bind the animation,
    /// tag members, reveal the subtree and publish the `Environment` resource.
    pub fn integrate(&mut self, root: Entity) -> IntegrationReport {
        let descendants: Vec<Entity> = self.children.iter_descendants(root).collect();
        let named: Vec<(Entity, String)> = descendants
            .iter()
            .filter_map(|&entity| {
                self.names
                    .get(entity)
                    .ok()
                    .map(|name| (entity, name.as_str().to_string()))
            })
            .collect();

        let manifest = self.scene.0.clone();
        let roles = NodeRoles::resolve(
            named.iter().map(|(entity, name)| (*entity, name.as_str())),
            &manifest.interactive_prefix,
        );

        if manifest.material_pass == MaterialPass::Uniform {
            self.apply_uniform_pass(&descendants, &named);
        }

        let mut missing = Vec::new();
        for role in [
            NodeRole::EnvironmentBase,
            NodeRole::PoleLightA,
            NodeRole::PoleLightB,
            NodeRole::PortalLight,
        ] {
            // The uniform pass already gave the base its lit baked material.
            if role == NodeRole::EnvironmentBase && manifest.applies_shadow_flags() {
                if roles.get(role).is_none() {
                    missing.push(missing_node(role, &manifest.interactive_prefix));
                }
                continue;
            }

            match (roles.get(role), self.registry.for_role(role).cloned()) {
                (Some(node), Some(material)) => self.assign_material(node, material),
                (None, _) => missing.push(missing_node(role, &manifest.interactive_prefix)),
                (Some(_), None) => {}
            }
        }

        if manifest.animation.is_some() && roles.get(NodeRole::Interactive).is_none() {
            missing.push(missing_node(NodeRole::Interactive, &manifest.interactive_prefix));
        }

        for error in &missing {
            report_missing_node(error);
        }

        let animation = self.bind_animation(root, &descendants);

        for &entity in &descendants {
            self.commands.entity(entity).insert(EnvironmentMember);
        }
        self.commands.entity(root).insert(Visibility::Inherited);
        self.commands.insert_resource(Environment {
            root,
            roles: roles.clone(),
        });

        IntegrationReport {
            roles,
            missing,
            animation,
        }
    }

    /// Lit baked material on every mesh; shadows only where the manifest asks.
    fn apply_uniform_pass(&mut self, descendants: &[Entity], named: &[(Entity, String)]) {
        let manifest = &self.scene.0;

        let mut receivers = HashSet::new();
        for (entity, name) in named {
            if manifest
                .shadow_receivers
                .iter()
                .any(|receiver| NodeMatcher::Exact(receiver).matches(name))
            {
                receivers.insert(*entity);
                receivers.extend(self.children.iter_descendants(*entity));
            }
        }

        let mut casters = HashSet::new();
        if let Some(parent) = manifest.shadow_caster_parent.as_deref() {
            for (entity, name) in named {
                if NodeMatcher::Exact(parent).matches(name) {
                    casters.extend(self.children.iter_descendants(*entity));
                }
            }
        }

        for &entity in descendants {
            if !self.mesh_nodes.contains(entity) {
                continue;
            }
            let mut node = self.commands.entity(entity);
            node.insert(MeshMaterial3d(self.registry.baked_lit.clone()));
            if !receivers.contains(&entity) {
                node.insert(NotShadowReceiver);
            }
            if !casters.contains(&entity) {
                node.insert(NotShadowCaster);
            }
        }
    }

    /// Give a node and every mesh below it the same material.
    fn assign_material(&mut self, node: Entity, material: Handle<StandardMaterial>) {
        let targets: Vec<Entity> = std::iter::once(node)
            .chain(self.children.iter_descendants(node))
            .filter(|entity| self.mesh_nodes.contains(*entity))
            .collect();
        for entity in targets {
            self.commands
                .entity(entity)
                .insert(MeshMaterial3d(material.clone()));
        }
    }

    /// Attach the pending graph to the subtree's animation player and register a handle.
    fn bind_animation(&mut self, root: Entity, descendants: &[Entity]) -> Option<String> {
        let pending = self.pending_animations.get(root).ok()?.clone();

        let Some(player) = descendants
            .iter()
            .copied()
            .find(|entity| self.players.contains(*entity))
        else {
            warn!(
                "Animation `{}` has no animation player in the environment, playback disabled",
                pending.name
            );
            return None;
        };

        self.commands
            .entity(player)
            .insert(AnimationGraphHandle(pending.graph.clone()));
        self.commands.entity(root).remove::<PendingAnimation>();
        self.animations.register(
            &pending.name,
            PlaybackHandle {
                player,
                node: pending.node,
                repetitions: pending.repetitions,
            },
        );
        Some(pending.name)
    }
}

fn missing_node(role: NodeRole, interactive_prefix: &str) -> SceneError {
    SceneError::MissingNode {
        role,
        name: role.matcher(interactive_prefix).pattern().to_string(),
    }
}

/// Loud while developing, quiet in release builds. The assignment is skipped either way.
fn report_missing_node(error: &SceneError) {
    if cfg!(debug_assertions) {
        error!("{error}; skipping");
    } else {
        debug!("{error}; skipping");
    }
}

/// Observer fired once the environment scene instance has spawned.
pub fn integrate_on_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut integration: EnvironmentIntegration,
    mut next_state: ResMut<NextState<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let report = integration.integrate(trigger.target());

    info!(
        "✓ Environment integrated: {} roles resolved, {} missing",
        report.roles.len(),
        report.missing.len()
    );
    rpc_interface.send_notification(
        "environment_ready",
        serde_json::json!({
            "roles": report.roles.len(),
            "missing": report.missing.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "animation": report.animation,
        }),
    );

    info!("→ Transitioning to Running state");
    next_state.set(AppState::Running);
}
