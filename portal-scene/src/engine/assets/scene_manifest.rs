use bevy::prelude::*;
use constants::asset_paths::{BAKED_TEXTURE, DEFAULT_MODEL};
use constants::scene_nodes::{
    ANIMATION_REPETITIONS, AXE_ANIMATION, INTERACTIVE_PREFIX, SHADOW_CASTER_PARENT,
    SHADOW_RECEIVERS,
};
use serde::{Deserialize, Serialize};

/// How materials are assigned once the environment has loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialPass {
    /// Only the exactly named nodes receive materials.
    Named,
    /// Every mesh gets the lit baked material, named light nodes are overridden
    /// afterwards and shadow flags are applied.
    #[default]
    Uniform,
}

/// Animation clip bound to a playback handle after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationBinding {
    /// Symbolic name the handle is registered under.
    pub name: String,
    /// Clip name inside the package; the first clip is used when absent.
    pub clip: Option<String>,
    pub repetitions: u32,
}

impl Default for AnimationBinding {
    fn default() -> Self {
        Self {
            name: AXE_ANIMATION.to_string(),
            clip: None,
            repetitions: ANIMATION_REPETITIONS,
        }
    }
}

/// Scene variant description as a Bevy asset. Mirrors the `*.scene.json` files.
/// Missing fields fall back to the latest variant.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneManifest {
    pub model: String,
    pub baked_texture: String,
    pub material_pass: MaterialPass,
    pub shadow_receivers: Vec<String>,
    pub shadow_caster_parent: Option<String>,
    pub interactive_prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationBinding>,
}

impl Default for SceneManifest {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            baked_texture: BAKED_TEXTURE.to_string(),
            material_pass: MaterialPass::Uniform,
            shadow_receivers: SHADOW_RECEIVERS.iter().map(|name| name.to_string()).collect(),
            shadow_caster_parent: Some(SHADOW_CASTER_PARENT.to_string()),
            interactive_prefix: INTERACTIVE_PREFIX.to_string(),
            animation: Some(AnimationBinding::default()),
        }
    }
}

impl SceneManifest {
    pub fn applies_shadow_flags(&self) -> bool {
        self.material_pass == MaterialPass::Uniform
    }
}

/// The manifest the running scene was built from.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveScene(pub SceneManifest);
