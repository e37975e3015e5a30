use crate::engine::systems::frame_driver::FrameDriver;
use crate::engine::systems::viewport::ViewportState;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::pbr::ShadowFilteringMethod;
use bevy::prelude::*;
use constants::camera::{
    DAMPING_FACTOR, FAR_PLANE, FIELD_OF_VIEW_DEGREES, INITIAL_POSITION, MAX_PITCH, MAX_RADIUS,
    MIN_RADIUS, NEAR_PLANE, ORBIT_TARGET, PAN_SPEED, ROTATE_SPEED, ZOOM_SPEED,
};

/// The camera the scene renders through and picks from.
#[derive(Component)]
pub struct SceneCamera;

/// Damped orbit around a target in spherical coordinates. Input adds
/// velocity; `update` applies a damped share of it each frame.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub damping_factor: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
    pan_velocity: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_position(INITIAL_POSITION, ORBIT_TARGET)
    }
}

impl OrbitCamera {
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().max(MIN_RADIUS);
        Self {
            target,
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
            damping_factor: DAMPING_FACTOR,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
            pan_velocity: Vec3::ZERO,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }

    /// Drag in pixels; dragging right swings the camera left around the target.
    pub fn rotate(&mut self, drag: Vec2) {
        self.yaw_velocity -= drag.x * ROTATE_SPEED;
        self.pitch_velocity += drag.y * ROTATE_SPEED;
    }

    /// Scroll in lines; positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        self.zoom_velocity -= lines * ZOOM_SPEED;
    }

    /// Drag in pixels, moving the target in the view plane.
    pub fn pan(&mut self, drag: Vec2) {
        let rotation = self.transform().rotation;
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        self.pan_velocity += (up * drag.y - right * drag.x) * PAN_SPEED * self.radius;
    }

    /// Apply the damped share of the accumulated velocity and decay the rest.
    /// Returns whether the camera moved.
    pub fn update(&mut self, delta_secs: f32) -> bool {
        let fraction = damping_fraction(self.damping_factor, delta_secs);
        if fraction <= 0.0 {
            return false;
        }
        let before = (self.yaw, self.pitch, self.radius, self.target);

        self.yaw += self.yaw_velocity * fraction;
        self.pitch = (self.pitch + self.pitch_velocity * fraction).clamp(-MAX_PITCH, MAX_PITCH);
        self.radius =
            (self.radius * (self.zoom_velocity * fraction).exp()).clamp(MIN_RADIUS, MAX_RADIUS);
        self.target += self.pan_velocity * fraction;

        let keep = 1.0 - fraction;
        self.yaw_velocity *= keep;
        self.pitch_velocity *= keep;
        self.zoom_velocity *= keep;
        self.pan_velocity *= keep;

        before != (self.yaw, self.pitch, self.radius, self.target)
    }
}

/// Share of the remaining velocity applied over `delta_secs`, such that a
/// 60Hz frame applies exactly `damping_factor`.
pub fn damping_fraction(damping_factor: f32, delta_secs: f32) -> f32 {
    1.0 - (1.0 - damping_factor.clamp(0.0, 1.0)).powf(delta_secs.max(0.0) * 60.0)
}

pub fn create_scene_camera(commands: &mut Commands, orbit: &OrbitCamera, viewport: &ViewportState) {
    commands.spawn((
        Name::new("scene camera"),
        SceneCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            aspect_ratio: viewport.aspect(),
        }),
        orbit.transform(),
        ShadowFilteringMethod::default(),
    ));
}

// Left drag orbits, right drag pans, wheel zooms
pub fn orbit_camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    driver: Res<FrameDriver>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    mut cameras: Query<&mut Transform, With<SceneCamera>>,
) {
    let drag: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    if drag != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            orbit.rotate(drag);
        } else if mouse_button.pressed(MouseButton::Right) {
            orbit.pan(drag);
        }
    }

    let scroll: f32 = scroll_events
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * 0.05,
        })
        .sum();
    if scroll.abs() > f32::EPSILON {
        orbit.zoom(scroll);
    }

    if orbit.update(driver.delta()) {
        for mut transform in &mut cameras {
            *transform = orbit.transform();
        }
    }
}
