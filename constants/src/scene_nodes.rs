/// Node names the baked environment packages are exported with.
pub const BAKED_NODE: &str = "baked";
pub const POLE_LIGHT_A_NODE: &str = "lightA";
pub const POLE_LIGHT_B_NODE: &str = "lightB";
pub const PORTAL_LIGHT_NODE: &str = "portal";

/// Prefix shared by the clickable axe meshes.
pub const INTERACTIVE_PREFIX: &str = "axe";

/// Symbolic name the axe animation is registered under.
pub const AXE_ANIMATION: &str = "axe";

/// Default number of times the axe animation repeats per click.
pub const ANIMATION_REPETITIONS: u32 = 2;

pub const SHADOW_RECEIVERS: &[&str] = &["Plane", "Cylinder", "Cylinder001"];
pub const SHADOW_CASTER_PARENT: &str = "axe";
