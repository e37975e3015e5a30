//! Portal scene engine.
//!
//! Loading and integration of the baked environment, the firefly effect
//! layer, camera controls and the per-frame driver.

pub mod assets;
pub mod camera;
pub mod core;
pub mod loading;
pub mod scene;
/// Additive firefly material and its custom vertex attribute.
pub mod shaders;
pub mod systems;
