//! Scene content that does not come from the environment package.

/// Shadow-casting directional light driven by the debug settings.
pub mod lighting;

/// Firefly particle buffer, quad-expanded mesh and the effect layer resource.
///
/// Particles are sampled once at startup and only their shader uniforms change.
pub mod particles;
