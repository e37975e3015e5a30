use crate::engine::camera::orbit_camera::SceneCamera;
use crate::engine::scene::particles::FireflyLayer;
use crate::engine::shaders::FireflyMaterial;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};
use constants::render_settings::MAX_PIXEL_RATIO;

/// Logical size and device pixel ratio of the render surface.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Default for ViewportState {
    // Zero-sized so the first frame always syncs from the window.
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl ViewportState {
    pub fn from_window(window: &Window) -> Self {
        Self {
            width: window.width(),
            height: window.height(),
            device_pixel_ratio: window.resolution.base_scale_factor(),
        }
    }

    /// Device pixel ratio capped to bound the GPU cost on dense displays.
    pub fn pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio.min(MAX_PIXEL_RATIO)
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Physical pixel size of the render surface at the capped pixel ratio.
    pub fn surface_size(&self) -> UVec2 {
        let pixel_ratio = self.pixel_ratio();
        UVec2::new(
            (self.width * pixel_ratio).round() as u32,
            (self.height * pixel_ratio).round() as u32,
        )
    }
}

/// Scale factor override that keeps the surface at or below the capped ratio.
fn capped_scale_factor(resolution: &WindowResolution) -> Option<f32> {
    (resolution.base_scale_factor() > MAX_PIXEL_RATIO).then_some(MAX_PIXEL_RATIO)
}

/// Render the window at the capped pixel ratio, keeping its logical size.
/// Returns whether the resolution was changed.
pub fn cap_surface_pixel_ratio(window: &mut Window) -> bool {
    let wanted = capped_scale_factor(&window.resolution);
    if window.resolution.scale_factor_override() == wanted {
        return false;
    }

    let (width, height) = (window.width(), window.height());
    window.resolution.set_scale_factor_override(wanted);
    window.resolution.set(width, height);
    true
}

// Keep surface resolution, camera aspect and particle pixel ratio in step with the window
pub fn track_viewport_resize(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportState>,
    mut projections: Query<&mut Projection, With<SceneCamera>>,
    layer: Option<Res<FireflyLayer>>,
    mut materials: ResMut<Assets<FireflyMaterial>>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    // Only touch the window when the cap changes, so it is not marked changed every frame.
    if window.resolution.scale_factor_override() != capped_scale_factor(&window.resolution) {
        cap_surface_pixel_ratio(&mut window);
    }
    let current = ViewportState::from_window(&window);
    if current == *viewport {
        return;
    }
    *viewport = current;

    for mut projection in &mut projections {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = viewport.aspect();
        }
    }

    if let Some(material) = layer.and_then(|layer| materials.get_mut(&layer.material)) {
        material.uniform.pixel_ratio = viewport.pixel_ratio();
    }

    let surface = viewport.surface_size();
    debug!(
        "Viewport {}x{} @{:.2}, surface {}x{}",
        viewport.width,
        viewport.height,
        viewport.pixel_ratio(),
        surface.x,
        surface.y
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::shaders::FireflyUniform;
    use approx::assert_relative_eq;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn pixel_ratio_never_exceeds_cap() {
        for device_pixel_ratio in [1.0, 1.5, 2.0, 3.0, 4.0] {
            let viewport = ViewportState {
                width: 800.0,
                height: 600.0,
                device_pixel_ratio,
            };
            assert!(viewport.pixel_ratio() <= MAX_PIXEL_RATIO);
        }
    }

    #[test]
    fn surface_size_follows_capped_ratio() {
        let viewport = ViewportState {
            width: 801.0,
            height: 600.0,
            device_pixel_ratio: 3.0,
        };

        assert_eq!(viewport.surface_size(), UVec2::new(1602, 1200));
        assert_relative_eq!(viewport.aspect(), 801.0 / 600.0);
    }

    #[test]
    fn zero_height_keeps_a_finite_aspect() {
        let viewport = ViewportState {
            width: 800.0,
            height: 0.0,
            device_pixel_ratio: 1.0,
        };

        assert_eq!(viewport.aspect(), 1.0);
    }

    /// Window as the backend reports it on a display with `scale_factor`.
    fn dense_window(physical_width: u32, physical_height: u32, scale_factor: f32) -> Window {
        let mut resolution = WindowResolution::default();
        resolution.set_physical_resolution(physical_width, physical_height);
        resolution.set_scale_factor(scale_factor);
        Window {
            resolution,
            ..default()
        }
    }

    #[test]
    fn dense_display_surface_is_capped() {
        let mut world = World::new();
        world.init_resource::<ViewportState>();
        world.init_resource::<Assets<FireflyMaterial>>();
        let window = world.spawn((dense_window(3000, 1500, 3.0), PrimaryWindow)).id();

        world.run_system_once(track_viewport_resize).unwrap();

        let window = world.get::<Window>(window).unwrap();
        let viewport = world.resource::<ViewportState>();
        assert_eq!(window.scale_factor(), MAX_PIXEL_RATIO);
        assert_eq!(window.physical_size(), UVec2::new(2000, 1000));
        assert_eq!(window.physical_size(), viewport.surface_size());
        assert_relative_eq!(window.width(), 1000.0);
        assert_relative_eq!(viewport.device_pixel_ratio, 3.0);
    }

    #[test]
    fn moving_to_a_low_density_display_drops_the_cap() {
        let mut window = dense_window(3000, 1500, 3.0);
        assert!(cap_surface_pixel_ratio(&mut window));
        assert!(!cap_surface_pixel_ratio(&mut window));

        window.resolution.set_scale_factor(1.0);
        assert!(cap_surface_pixel_ratio(&mut window));

        assert_eq!(window.resolution.scale_factor_override(), None);
        assert_eq!(window.physical_size(), UVec2::new(1000, 500));
        assert_eq!(
            ViewportState::from_window(&window).surface_size(),
            window.physical_size()
        );
    }

    #[test]
    fn resize_updates_camera_and_particles() {
        let mut world = World::new();
        world.init_resource::<ViewportState>();

        let mut materials = Assets::<FireflyMaterial>::default();
        let material = materials.add(FireflyMaterial {
            uniform: FireflyUniform::new(1.0, 100.0),
        });
        world.insert_resource(materials);
        world.insert_resource(FireflyLayer {
            material: material.clone(),
        });

        let window = world.spawn((dense_window(3000, 1500, 3.0), PrimaryWindow)).id();
        let camera = world
            .spawn((
                SceneCamera,
                Projection::Perspective(PerspectiveProjection::default()),
            ))
            .id();

        world.run_system_once(track_viewport_resize).unwrap();

        let Projection::Perspective(perspective) = world.get::<Projection>(camera).unwrap() else {
            panic!("perspective projection expected");
        };
        assert_relative_eq!(perspective.aspect_ratio, 2.0, epsilon = 1e-5);
        let materials = world.resource::<Assets<FireflyMaterial>>();
        assert_eq!(materials.get(&material).unwrap().uniform.pixel_ratio, 2.0);

        // A second resize changes the aspect again.
        world
            .get_mut::<Window>(window)
            .unwrap()
            .resolution
            .set(600.0, 600.0);
        world.run_system_once(track_viewport_resize).unwrap();

        let Projection::Perspective(perspective) = world.get::<Projection>(camera).unwrap() else {
            panic!("perspective projection expected");
        };
        assert_relative_eq!(perspective.aspect_ratio, 1.0, epsilon = 1e-5);
        let viewport = world.resource::<ViewportState>();
        assert_relative_eq!(viewport.aspect(), 1.0, epsilon = 1e-5);
    }
}
