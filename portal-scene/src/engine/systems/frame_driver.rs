use crate::engine::scene::particles::FireflyLayer;
use crate::engine::shaders::FireflyMaterial;
use bevy::prelude::*;

/// Elapsed time of this frame and the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    elapsed: f32,
    previous: f32,
}

impl FrameClock {
    /// Record a new elapsed time and return the delta. A clock reading that
    /// goes backwards is held at the last value, so the delta is never negative.
    pub fn tick(&mut self, elapsed: f32) -> f32 {
        self.previous = self.elapsed;
        self.elapsed = elapsed.max(self.elapsed);
        self.delta()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn delta(&self) -> f32 {
        self.elapsed - self.previous
    }
}

/// Owner of the per-frame tick. Stopping it halts the frame systems and
/// asks the app to exit.
#[derive(Resource, Debug, Default)]
pub struct FrameDriver {
    clock: FrameClock,
    stopped: bool,
}

impl FrameDriver {
    pub fn tick(&mut self, elapsed: f32) -> f32 {
        self.clock.tick(elapsed)
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn delta(&self) -> f32 {
        self.clock.delta()
    }

    pub fn stop(&mut self) {
        if !self.stopped {
            info!("Frame driver stopping at {:.2}s", self.clock.elapsed());
        }
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// Clock first, then everything that reads it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Clock,
    Update,
}

pub fn frame_driver_running(driver: Res<FrameDriver>) -> bool {
    !driver.is_stopped()
}

pub fn advance_frame_clock(time: Res<Time>, mut driver: ResMut<FrameDriver>) {
    driver.tick(time.elapsed_secs());
}

pub fn push_particle_time(
    driver: Res<FrameDriver>,
    layer: Option<Res<FireflyLayer>>,
    mut materials: ResMut<Assets<FireflyMaterial>>,
) {
    let Some(layer) = layer else {
        return;
    };
    if let Some(material) = materials.get_mut(&layer.material) {
        material.uniform.time = driver.elapsed();
    }
}

pub fn exit_when_stopped(
    driver: Res<FrameDriver>,
    mut exit: EventWriter<AppExit>,
    mut exit_sent: Local<bool>,
) {
    if driver.is_stopped() && !*exit_sent {
        info!("→ Frame driver stopped, exiting");
        exit.write(AppExit::Success);
        *exit_sent = true;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn stop_on_escape(keyboard: Res<ButtonInput<KeyCode>>, mut driver: ResMut<FrameDriver>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        driver.stop();
    }
}
