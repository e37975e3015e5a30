use bevy::prelude::*;
use bevy::window::PresentMode;

#[cfg(target_arch = "wasm32")]
use crate::error::SceneError;
#[cfg(target_arch = "wasm32")]
use constants::render_settings::{CANVAS_ELEMENT_ID, CANVAS_SELECTOR};

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some(CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Portal".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

/// The canvas must exist before the app starts; winit would otherwise create
/// its own detached canvas and nothing would show.
#[cfg(target_arch = "wasm32")]
pub fn verify_render_surface() -> Result<(), SceneError> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CANVAS_ELEMENT_ID))
        .map(|_| ())
        .ok_or_else(|| SceneError::MissingRenderSurface(CANVAS_SELECTOR.to_string()))
}
