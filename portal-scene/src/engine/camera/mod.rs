//! Scene camera and damped orbit controls.

/// Orbit camera resource, camera spawning and the input controller system.
pub mod orbit_camera;
