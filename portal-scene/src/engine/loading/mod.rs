//! Loading pipeline for the portal environment.
//!
//! Resolves the scene manifest, issues the model and baked texture loads in
//! parallel, spawns the environment once its package settles and integrates
//! the spawned subtree. Every failure ends in a visible fallback.

/// Environment spawning once the model package and its dependencies are ready.
pub mod environment_loader;

/// Load-state polling shared by every loader.
pub mod load_outcome;

/// Scene manifest loading and the parallel environment load kick-off.
pub mod manifest_loader;

/// Stand-in geometry for a failed environment load.
pub mod placeholder;

/// Loading progress flags driving the state transitions.
pub mod progress;

/// Material, shadow, role and animation integration of the spawned subtree.
pub mod scene_integration;

/// Baked texture load settings, failure handling and colour-space configuration.
pub mod texture_config;
