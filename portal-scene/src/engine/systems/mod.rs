//! Per-frame runtime systems and developer controls.
//!
//! Provides the frame driver that owns the clock and stop handle, viewport
//! tracking, and the debug settings surfaced through the native overlay and
//! the RPC bridge.

/// Native debug panel: H toggles, Tab cycles, arrow keys adjust.
#[cfg(not(target_arch = "wasm32"))]
pub mod debug_overlay;

/// Clamped developer settings and the system applying them to the scene.
pub mod debug_settings;

/// Frame clock, uniform push and the explicit stop handle.
///
/// Ordering is expressed through `FrameSet`: clock first, then its readers.
pub mod frame_driver;

/// Viewport size and pixel ratio tracking on window resize.
pub mod viewport;
