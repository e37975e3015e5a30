/// Inclusive range and step for a tweakable value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ControlRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

pub const PARTICLE_SIZE_RANGE: ControlRange = ControlRange::new(0.0, 500.0, 1.0);
pub const SHADOW_BIAS_RANGE: ControlRange = ControlRange::new(-0.01, 0.01, 0.0001);
pub const SHADOW_BLUR_RANGE: ControlRange = ControlRange::new(0.0, 10.0, 0.1);
pub const LIGHT_X_RANGE: ControlRange = ControlRange::new(-20.0, 20.0, 0.1);
pub const LIGHT_Y_RANGE: ControlRange = ControlRange::new(-20.0, 50.0, 0.1);
pub const LIGHT_Z_RANGE: ControlRange = ControlRange::new(-20.0, 20.0, 0.1);

pub const DEFAULT_CLEAR_COLOUR: &str = "#201919";
pub const DEFAULT_SHADOW_BIAS: f32 = 0.0;
pub const DEFAULT_SHADOW_BLUR: f32 = 1.0;
pub const DEFAULT_LIGHT_POSITION: [f32; 3] = [3.0, 6.0, 2.0];

/// The panel starts hidden.
pub const PANEL_VISIBLE_BY_DEFAULT: bool = false;
