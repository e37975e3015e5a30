use bevy::prelude::*;
use std::collections::HashMap;

/// Blocks re-triggering while the bound animation plays. Opened on play,
/// closed once the player reports the animation finished.
#[derive(Resource, Debug, Default)]
pub struct PlaybackGate {
    active: bool,
}

impl PlaybackGate {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn open(&mut self) {
        self.active = true;
    }

    pub fn close(&mut self) {
        self.active = false;
    }
}

/// Where a bound clip lives: the player entity and its graph node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackHandle {
    pub player: Entity,
    pub node: AnimationNodeIndex,
    pub repetitions: u32,
}

/// Symbolic animation names to playback handles, filled during integration.
#[derive(Resource, Debug, Default)]
pub struct AnimationRegistry {
    handles: HashMap<String, PlaybackHandle>,
}

impl AnimationRegistry {
    pub fn register(&mut self, name: &str, handle: PlaybackHandle) {
        info!("Animation `{}` registered on {}", name, handle.player);
        self.handles.insert(name.to_string(), handle);
    }

    pub fn get(&self, name: &str) -> Option<&PlaybackHandle> {
        self.handles.get(name)
    }
}

/// A left click landed on an environment node matching the interactive prefix.
#[derive(Event, Debug, Clone)]
pub struct InteractiveNodeClicked {
    pub node: Entity,
    pub name: String,
    pub distance: f32,
}
