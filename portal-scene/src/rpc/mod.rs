//! JSON-RPC 2.0 bridge to the page embedding the scene.
//!
//! Messages travel over `postMessage` between the scene (iframe) and its
//! parent window. Requests carrying an ID get a response; requests without
//! one are treated as notifications and only executed.
//!
//! ```text
//! Parent window  <──postMessage──>  Portal scene (iframe)
//!        │                                │
//!        ├─ Request (with ID) ──────────> │
//!        │                                ├─ Apply to DebugSettings / FrameDriver
//!        │ <───────── Response (with ID) ─┤
//!        │                                │
//!        │ <──── Notification (no ID) ────┤
//! ```
//!
//! ## Methods
//!
//! - `get_debug_settings`: current developer settings
//! - `set_debug_setting`: `{ "param": "particle_size", "value": 250 }`, numbers
//!   are clamped into range; `clear_colour` takes a `#rrggbb` string
//! - `toggle_debug_panel`: flip the native panel visibility
//! - `stop`: halt the frame driver and exit
//!
//! ## Notifications sent
//!
//! - `environment_ready`: roles resolved, missing nodes, bound animation
//! - `asset_load_failed`: path, reason and the fallback in use
//! - `debug_settings_changed`: the full settings after any change
//!
//! ## Error codes
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// Request dispatch, the outbox and the WASM message listener.
pub mod web_rpc;
