use crate::error::SceneError;
use bevy::asset::RecursiveDependencyLoadState;
use bevy::prelude::*;
use std::task::Poll;

/// Poll a load until it and its dependencies settle. Both branches of the
/// result must be handled by the caller; a failed load never goes silent.
pub fn poll_asset<A: Asset>(
    asset_server: &AssetServer,
    handle: &Handle<A>,
    path: &str,
) -> Poll<Result<Handle<A>, SceneError>> {
    match asset_server.get_recursive_dependency_load_state(handle) {
        Some(RecursiveDependencyLoadState::Loaded) => Poll::Ready(Ok(handle.clone())),
        Some(RecursiveDependencyLoadState::Failed(error)) => {
            Poll::Ready(Err(SceneError::AssetLoad {
                path: path.to_string(),
                reason: error.to_string(),
            }))
        }
        _ => Poll::Pending,
    }
}

/// Headless app with a real asset server reading the crate's `assets/` folder.
#[cfg(test)]
pub(crate) fn asset_test_app() -> App {
    use crate::engine::assets::scene_manifest::SceneManifest;
    use bevy::app::TaskPoolPlugin;
    use bevy::asset::AssetMetaCheck;
    use bevy_common_assets::json::JsonAssetPlugin;
    use constants::asset_paths::SCENE_MANIFEST_EXTENSION;

    let mut app = App::new();
    app.add_plugins((
        TaskPoolPlugin::default(),
        AssetPlugin {
            meta_check: AssetMetaCheck::Never,
            ..default()
        },
        JsonAssetPlugin::<SceneManifest>::new(&[SCENE_MANIFEST_EXTENSION]),
    ));
    app
}

/// Run frames until `done` holds, giving background loads time to settle.
#[cfg(test)]
pub(crate) fn update_until(app: &mut App, mut done: impl FnMut(&mut App) -> bool) -> bool {
    for _ in 0..500 {
        app.update();
        if done(app) {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(2));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::scene_manifest::{MaterialPass, SceneManifest};

    fn poll_manifest(path: &str) -> Result<SceneManifest, SceneError> {
        let mut app = asset_test_app();
        let handle: Handle<SceneManifest> = app.world().resource::<AssetServer>().load(path);

        let mut outcome = None;
        let settled = update_until(&mut app, |app| {
            let server = app.world().resource::<AssetServer>();
            match poll_asset(server, &handle, path) {
                Poll::Pending => false,
                Poll::Ready(result) => {
                    outcome = Some(result.map(|handle| {
                        app.world()
                            .resource::<Assets<SceneManifest>>()
                            .get(&handle)
                            .cloned()
                    }));
                    true
                }
            }
        });
        assert!(settled, "load of `{path}` never settled");

        match outcome {
            Some(Ok(manifest)) => Ok(manifest.expect("loaded manifest is stored")),
            Some(Err(error)) => Err(error),
            None => unreachable!(),
        }
    }

    #[test]
    fn loaded_manifest_is_ready() {
        let manifest = poll_manifest("scenes/portal_v3.scene.json").unwrap();

        assert_eq!(manifest.material_pass, MaterialPass::Named);
        assert!(manifest.animation.is_none());
    }

    #[test]
    fn missing_file_is_an_asset_load_error() {
        let error = poll_manifest("scenes/missing.scene.json").unwrap_err();

        let SceneError::AssetLoad { path, reason } = &error else {
            panic!("expected an asset load error, got {error:?}");
        };
        assert_eq!(path, "scenes/missing.scene.json");
        assert!(!reason.is_empty());
    }
}
