use bevy::math::Vec3;

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEGREES: f32 = 50.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

pub const INITIAL_POSITION: Vec3 = Vec3::new(2.0, 3.0, 5.0);
pub const ORBIT_TARGET: Vec3 = Vec3::ZERO;

/// Fraction of orbit velocity removed per 60Hz frame.
pub const DAMPING_FACTOR: f32 = 0.05;

/// Radians of orbit per pixel of pointer drag.
pub const ROTATE_SPEED: f32 = 0.005;

/// Fraction of radius per scroll line.
pub const ZOOM_SPEED: f32 = 0.1;

pub const MIN_RADIUS: f32 = 0.5;
pub const MAX_RADIUS: f32 = 40.0;

/// Pitch limit keeps the camera off the poles.
pub const MAX_PITCH: f32 = 1.55;

/// World units of pan per pixel of drag, scaled by the orbit radius.
pub const PAN_SPEED: f32 = 0.002;
