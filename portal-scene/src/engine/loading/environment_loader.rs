use crate::engine::assets::environment_assets::{EnvironmentAssets, EnvironmentRoot, PendingAnimation};
use crate::engine::assets::scene_manifest::{ActiveScene, AnimationBinding};
use crate::engine::core::app_state::AppState;
use crate::engine::loading::load_outcome::poll_asset;
use crate::engine::loading::placeholder::spawn_placeholder;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_integration::integrate_on_ready;
use crate::error::SceneError;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use std::task::Poll;

// Spawn the environment once the package and its dependencies are loaded
pub fn spawn_environment_when_loaded(
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    assets: Option<Res<EnvironmentAssets>>,
    scene: Option<Res<ActiveScene>>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if loading_progress.environment_spawned || loading_progress.failed {
        return;
    }
    let (Some(assets), Some(scene)) = (assets, scene) else {
        return;
    };

    let outcome = match poll_asset(&asset_server, &assets.model, &assets.model_path) {
        Poll::Pending => return,
        Poll::Ready(Ok(handle)) => gltfs
            .get(&handle)
            .ok_or_else(|| SceneError::EmptyPackage(assets.model_path.clone()))
            .and_then(|gltf| {
                spawn_environment(&mut commands, gltf, &assets.model_path, &scene.0.animation, &mut graphs)
            }),
        Poll::Ready(Err(error)) => Err(error),
    };

    match outcome {
        Ok(root) => {
            info!("Environment spawned as {root}, waiting for scene instance");
            loading_progress.environment_spawned = true;
        }
        Err(error) => {
            error!("{error}");
            loading_progress.failed = true;
            spawn_placeholder(&mut commands, &mut meshes, &mut materials);
            rpc_interface.send_notification(
                "asset_load_failed",
                serde_json::json!({
                    "path": assets.model_path,
                    "reason": error.to_string(),
                    "fallback": "placeholder",
                }),
            );
            info!("→ Transitioning to Degraded state");
            next_state.set(AppState::Degraded);
        }
    }
}

/// Spawn the package's scene hidden; it is revealed after integration.
fn spawn_environment(
    commands: &mut Commands,
    gltf: &Gltf,
    path: &str,
    binding: &Option<AnimationBinding>,
    graphs: &mut Assets<AnimationGraph>,
) -> Result<Entity, SceneError> {
    let scene = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
        .ok_or_else(|| SceneError::EmptyPackage(path.to_string()))?;

    let mut root = commands.spawn((
        Name::new("environment"),
        EnvironmentRoot,
        SceneRoot(scene),
        Transform::default(),
        Visibility::Hidden,
    ));

    if let Some(pending) = binding.as_ref().and_then(|binding| build_animation(gltf, binding, graphs)) {
        info!("Animation clip bound as `{}`", pending.name);
        root.insert(pending);
    }

    root.observe(integrate_on_ready);
    Ok(root.id())
}

/// Graph holding the bound clip: the named one, else the package's first.
fn build_animation(
    gltf: &Gltf,
    binding: &AnimationBinding,
    graphs: &mut Assets<AnimationGraph>,
) -> Option<PendingAnimation> {
    let clip = binding
        .clip
        .as_deref()
        .and_then(|name| gltf.named_animations.get(name))
        .or_else(|| gltf.animations.first())?
        .clone();

    let (graph, node) = AnimationGraph::from_clip(clip);
    Some(PendingAnimation {
        name: binding.name.clone(),
        graph: graphs.add(graph),
        node,
        repetitions: binding.repetitions,
    })
}
