use crate::engine::assets::environment_assets::EnvironmentAssets;
use crate::engine::assets::material_registry::MaterialRegistry;
use crate::engine::assets::scene_manifest::{ActiveScene, SceneManifest};
use crate::engine::loading::load_outcome::poll_asset;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::texture_config::load_baked_texture;
use bevy::prelude::*;
use constants::asset_paths::DEFAULT_SCENE_MANIFEST;
use std::task::Poll;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SceneManifest>>,
    path: String,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    let manifest_path = manifest_path();
    info!("Loading scene manifest from: {}", manifest_path);
    manifest_loader.handle = Some(asset_server.load(&manifest_path));
    manifest_loader.path = manifest_path;
}

/// Native builds may point at another variant through `PORTAL_SCENE`.
fn manifest_path() -> String {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(path) = std::env::var(constants::asset_paths::PORTAL_SCENE_ENV) {
            return path;
        }
    }

    DEFAULT_SCENE_MANIFEST.to_string()
}

// Resolve the manifest, falling back to the built-in variant, then issue the environment loads
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<SceneManifest>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if loading_progress.manifest_loaded {
        return;
    }
    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    let manifest = match poll_asset(&asset_server, handle, &manifest_loader.path) {
        Poll::Pending => return,
        Poll::Ready(Ok(handle)) => {
            let Some(manifest) = manifests.get(&handle) else {
                return;
            };
            info!("✓ Scene manifest loaded");
            manifest.clone()
        }
        Poll::Ready(Err(error)) => {
            warn!("{error}; using the built-in scene manifest");
            SceneManifest::default()
        }
    };

    begin_environment_loads(&mut commands, &asset_server, &mut materials, &manifest);
    commands.insert_resource(ActiveScene(manifest));
    loading_progress.manifest_loaded = true;
}

/// Issue the model and baked image loads and build the material registry
/// around the image handle.
fn begin_environment_loads(
    commands: &mut Commands,
    asset_server: &AssetServer,
    materials: &mut Assets<StandardMaterial>,
    manifest: &SceneManifest,
) {
    info!("Loading environment:");
    info!("  Model: {}", manifest.model);
    info!("  Baked texture: {}", manifest.baked_texture);

    let baked_texture = load_baked_texture(asset_server, &manifest.baked_texture);
    commands.insert_resource(MaterialRegistry::create(materials, baked_texture.clone()));
    commands.insert_resource(EnvironmentAssets {
        model: asset_server.load(&manifest.model),
        model_path: manifest.model.clone(),
        baked_texture,
        baked_texture_path: manifest.baked_texture.clone(),
    });
}
