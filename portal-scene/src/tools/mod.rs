//! User-facing tools operating on the loaded scene.

/// Mouse picking and bounded animation playback on interactive nodes.
pub mod interaction;
