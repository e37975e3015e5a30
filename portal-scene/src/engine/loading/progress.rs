use bevy::prelude::*;

#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub baked_texture_loaded: bool,
    pub baked_texture_configured: bool,
    pub environment_spawned: bool,
    pub failed: bool,
}
