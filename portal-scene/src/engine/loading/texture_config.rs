use crate::engine::assets::environment_assets::EnvironmentAssets;
use crate::engine::assets::material_registry::MaterialRegistry;
use crate::engine::loading::load_outcome::poll_asset;
use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::image::{ImageLoaderSettings, ImageSampler};
use bevy::prelude::*;
use std::task::Poll;

/// Request the baked lighting image as already gamma-encoded colour data.
/// Bevy keeps the top-left UV origin the baking tool writes, so no flip is applied.
pub fn load_baked_texture(asset_server: &AssetServer, path: &str) -> Handle<Image> {
    asset_server.load_with_settings(path.to_string(), |settings: &mut ImageLoaderSettings| {
        settings.is_srgb = true;
        settings.sampler = ImageSampler::linear();
    })
}

// Watch the baked image; a failure strips the texture but keeps the environment.
pub fn check_baked_texture(
    mut loading_progress: ResMut<LoadingProgress>,
    assets: Option<Res<EnvironmentAssets>>,
    registry: Option<Res<MaterialRegistry>>,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if loading_progress.baked_texture_loaded {
        return;
    }
    let (Some(assets), Some(registry)) = (assets, registry) else {
        return;
    };

    match poll_asset(&asset_server, &assets.baked_texture, &assets.baked_texture_path) {
        Poll::Pending => {}
        Poll::Ready(Ok(_)) => {
            info!("✓ Baked texture loaded");
            loading_progress.baked_texture_loaded = true;
        }
        Poll::Ready(Err(error)) => {
            error!("{error}; rendering the environment untextured");
            registry.strip_baked_texture(&mut materials);
            rpc_interface.send_notification(
                "asset_load_failed",
                serde_json::json!({
                    "path": assets.baked_texture_path,
                    "reason": error.to_string(),
                    "fallback": "untextured",
                }),
            );
            // Nothing left to wait for.
            loading_progress.baked_texture_loaded = true;
            loading_progress.baked_texture_configured = true;
        }
    }
}

// Force an sRGB view when the decoder produced a linear format. Already-sRGB
// images are left alone so they are not re-uploaded.
pub fn configure_baked_texture(
    mut loading_progress: ResMut<LoadingProgress>,
    assets: Option<Res<EnvironmentAssets>>,
    mut images: ResMut<Assets<Image>>,
) {
    if loading_progress.baked_texture_configured || !loading_progress.baked_texture_loaded {
        return;
    }
    let Some(assets) = assets else {
        return;
    };

    let Some(format) = images
        .get(&assets.baked_texture)
        .map(|image| image.texture_descriptor.format)
    else {
        return;
    };

    if !format.is_srgb() {
        if let Some(image) = images.get_mut(&assets.baked_texture) {
            image.texture_descriptor.format = format.add_srgb_suffix();
        }
        info!("✓ Baked texture reinterpreted as sRGB colour data");
    }
    loading_progress.baked_texture_configured = true;
}
