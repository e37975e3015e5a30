use bevy::prelude::*;

/// Application lifecycle. `Degraded` is terminal for the environment: the
/// scene keeps rendering placeholder geometry and fireflies.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
    Degraded,
}

pub fn announce_running() {
    info!("Portal scene running");
}

pub fn announce_degraded() {
    warn!("Portal scene running without its environment");
}
