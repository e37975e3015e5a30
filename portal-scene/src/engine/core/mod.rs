//! Core application setup and state management.
//!
//! Handles the application lifecycle, window configuration and plugin
//! initialisation for both native and WASM targets.

/// Application setup, plugin configuration and system scheduling.
///
/// Builds the app with the loading pipeline, frame driver, effect layer,
/// interaction layer and RPC bridge.
pub mod app_setup;

/// Application state machine: loading, running or degraded.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Binds the canvas on the web and checks it exists before startup.
pub mod window_config;
