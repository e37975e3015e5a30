//! Click-to-play interaction with the environment.
//!
//! A released left click is turned into normalised device coordinates, cast
//! as a ray against the environment members and filtered by the interactive
//! name prefix. A match restarts the bound animation unless the playback
//! gate is still open.
//!
//! ```text
//! left click released
//!   └─> pick_interactive_node()      ray cast, prefix filter
//!       └─> InteractiveNodeClicked
//!           └─> trigger_playback()   gate closed? restart x2, open gate
//! release_finished_playback()        animation finished? close gate
//! ```

use crate::engine::core::app_state::AppState;
use crate::engine::systems::frame_driver::frame_driver_running;
use bevy::prelude::*;

/// Cursor to NDC conversion, ray construction and hit filtering.
pub mod ray;

/// Mesh ray casting against the integrated environment.
pub mod picking;

/// Gated animation restart and completion tracking.
pub mod playback;

/// Playback gate, animation registry and the click event.
pub mod state;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<state::PlaybackGate>()
            .init_resource::<state::AnimationRegistry>()
            .add_event::<state::InteractiveNodeClicked>()
            .add_systems(
                Update,
                (
                    picking::pick_interactive_node,
                    playback::trigger_playback,
                    playback::release_finished_playback,
                )
                    .chain()
                    .run_if(in_state(AppState::Running))
                    .run_if(frame_driver_running),
            );
    }
}
