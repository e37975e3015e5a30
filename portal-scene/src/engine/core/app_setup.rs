use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::asset_paths::SCENE_MANIFEST_EXTENSION;
// Crate engine modules
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::camera::orbit_camera::{OrbitCamera, create_scene_camera, orbit_camera_controller};
use crate::engine::core::app_state::{AppState, announce_degraded, announce_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::scene::lighting::spawn_scene_light;
use crate::engine::scene::particles::spawn_fireflies;
use crate::engine::shaders::FireflyMaterial;
use crate::engine::systems::debug_settings::{DebugSettings, apply_debug_settings};
use crate::engine::systems::frame_driver::{
    FrameDriver, FrameSet, advance_frame_clock, exit_when_stopped, frame_driver_running,
    push_particle_time,
};
use crate::engine::systems::viewport::{ViewportState, track_viewport_resize};
// Loading pipeline
use crate::engine::loading::environment_loader::spawn_environment_when_loaded;
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::texture_config::{check_baked_texture, configure_baked_texture};
// Interaction and RPC
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::interaction::InteractionPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::debug_overlay::{
    OverlayCursor, create_debug_overlay, debug_overlay_input, refresh_debug_overlay,
};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::frame_driver::stop_on_escape;

pub fn create_app() -> App {
    let mut app = App::new();

    let settings = DebugSettings::default();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(MaterialPlugin::<FireflyMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        })
        // Registers SceneManifest as a loadable asset type from `*.scene.json` files.
        .add_plugins(JsonAssetPlugin::<SceneManifest>::new(&[SCENE_MANIFEST_EXTENSION]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(InteractionPlugin);

    // Initialise resources early
    app.insert_resource(ClearColor(settings.clear_colour()))
        .insert_resource(settings)
        .init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<FrameDriver>()
        .init_resource::<ViewportState>()
        .init_resource::<OrbitCamera>();

    app.configure_sets(
        Update,
        (FrameSet::Clock, FrameSet::Update)
            .chain()
            .run_if(frame_driver_running),
    );

    // State-based system scheduling
    app.add_systems(Startup, (setup, spawn_fireflies, start_loading).chain())
        .add_systems(
            Update,
            (
                // Loading phase systems
                load_manifest_system,
                check_baked_texture,
                configure_baked_texture,
                spawn_environment_when_loaded,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Running), announce_running)
        .add_systems(OnEnter(AppState::Degraded), announce_degraded);

    // Per-frame driver: clock, then its readers
    app.add_systems(Update, advance_frame_clock.in_set(FrameSet::Clock))
        .add_systems(
            Update,
            (
                track_viewport_resize,
                apply_debug_settings,
                push_particle_time,
                orbit_camera_controller,
            )
                .chain()
                .in_set(FrameSet::Update),
        )
        .add_systems(Last, exit_when_stopped);

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.init_resource::<OverlayCursor>().add_systems(
            Update,
            (stop_on_escape, debug_overlay_input, refresh_debug_overlay)
                .chain()
                .before(FrameSet::Update),
        );
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(
    mut commands: Commands,
    orbit: Res<OrbitCamera>,
    viewport: Res<ViewportState>,
    settings: Res<DebugSettings>,
) {
    info!("=== PORTAL SCENE ===");

    create_scene_camera(&mut commands, &orbit, &viewport);
    spawn_scene_light(&mut commands, &settings);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_debug_overlay(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
