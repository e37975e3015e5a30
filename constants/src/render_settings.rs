/// Upper bound on the device pixel ratio used for rendering.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// CSS selector of the canvas the renderer binds to on the web.
pub const CANVAS_SELECTOR: &str = "#root";

/// Element id behind `CANVAS_SELECTOR`.
pub const CANVAS_ELEMENT_ID: &str = "root";

pub const POLE_LIGHT_COLOUR: &str = "#ede8c7";
pub const PORTAL_LIGHT_COLOUR: &str = "#edd1d3";

/// Colour of the stand-in geometry shown when the environment fails to load.
pub const PLACEHOLDER_COLOUR: &str = "#5a4e4e";

/// Illuminance of the shadow-casting scene light, in lux.
pub const SCENE_LIGHT_ILLUMINANCE: f32 = 2_000.0;
