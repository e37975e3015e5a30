//! Shared configuration for the portal scene.

pub mod asset_paths;
pub mod camera;
pub mod debug_controls;
pub mod particles;
pub mod render_settings;
pub mod scene_nodes;
