/// Scene manifest loaded at startup unless overridden by `PORTAL_SCENE_ENV`.
pub const DEFAULT_SCENE_MANIFEST: &str = "scenes/portal.scene.json";

/// Native override for the manifest path.
pub const PORTAL_SCENE_ENV: &str = "PORTAL_SCENE";

/// Extension registered with the JSON asset loader for scene manifests.
pub const SCENE_MANIFEST_EXTENSION: &str = "scene.json";

/// Environment package used by the built-in manifest.
pub const DEFAULT_MODEL: &str = "models/portal_baked_v4.glb";

/// Baked lighting image shared by every variant.
pub const BAKED_TEXTURE: &str = "models/baked.jpg";

pub const FIREFLY_SHADER: &str = "shaders/fireflies.wgsl";
