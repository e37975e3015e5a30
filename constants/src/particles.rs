use bevy::math::Vec3;

/// Number of fireflies in the effect layer.
pub const PARTICLE_COUNT: usize = 30;

/// Lower corner of the sampling volume.
pub const VOLUME_MIN: Vec3 = Vec3::new(-2.0, 0.0, -2.0);

/// Upper corner of the sampling volume.
pub const VOLUME_MAX: Vec3 = Vec3::new(2.0, 1.5, 2.0);

/// Global size multiplier applied to every particle.
pub const DEFAULT_SIZE: f32 = 100.0;

/// Vertices emitted per particle (two triangles).
pub const VERTICES_PER_PARTICLE: usize = 6;
