//! Asset-side data for the portal environment.
//!
//! Holds the scene manifest describing each variant, the shared material
//! registry, the typed role mapping that replaces name lookups and the
//! handles/markers of the loaded environment.

/// Environment load handles, subtree markers and the integrated environment resource.
pub mod environment_assets;

/// Shared material instances assigned to named environment nodes.
pub mod material_registry;

/// Typed role mapping resolved from node names once at integration.
pub mod node_roles;

/// Scene variant manifest loaded from JSON.
pub mod scene_manifest;
