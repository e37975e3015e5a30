use crate::engine::assets::node_roles::NodeRole;

/// Failures the scene recovers from or reports before startup.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The canvas the renderer binds to is absent from the page.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    #[error("render surface `{0}` not found in the document")]
    MissingRenderSurface(String),

    /// A manifest, model or texture could not be fetched or parsed.
    #[error("failed to load `{path}`: {reason}")]
    AssetLoad { path: String, reason: String },

    /// The environment package carries no scene to spawn.
    #[error("`{0}` contains no scenes")]
    EmptyPackage(String),

    /// An expected node name is absent from the loaded environment.
    #[error("no node named `{name}` for role {role}")]
    MissingNode { role: NodeRole, name: String },

    #[error("unknown debug parameter `{0}`")]
    UnknownDebugParam(String),

    #[error("invalid colour `{0}`")]
    InvalidColour(String),
}
