use crate::engine::assets::node_roles::NodeRole;
use bevy::prelude::*;
use constants::render_settings::{POLE_LIGHT_COLOUR, PORTAL_LIGHT_COLOUR};

/// Shared materials assigned to environment nodes. Handles are aliased on
/// purpose: both pole lights point at the same instance.
#[derive(Resource, Debug, Clone)]
pub struct MaterialRegistry {
    /// Unlit baked lighting, used by the named pass.
    pub baked: Handle<StandardMaterial>,
    /// Lit baked lighting, used by the uniform pass so shadows show on it.
    pub baked_lit: Handle<StandardMaterial>,
    pub pole_light: Handle<StandardMaterial>,
    pub portal_light: Handle<StandardMaterial>,
}

impl MaterialRegistry {
    pub fn create(materials: &mut Assets<StandardMaterial>, baked_texture: Handle<Image>) -> Self {
        Self {
            baked: materials.add(StandardMaterial {
                base_color_texture: Some(baked_texture.clone()),
                unlit: true,
                ..default()
            }),
            baked_lit: materials.add(StandardMaterial {
                base_color_texture: Some(baked_texture),
                perceptual_roughness: 1.0,
                reflectance: 0.0,
                ..default()
            }),
            pole_light: materials.add(StandardMaterial {
                base_color: hex_colour(POLE_LIGHT_COLOUR),
                unlit: true,
                ..default()
            }),
            portal_light: materials.add(StandardMaterial {
                base_color: hex_colour(PORTAL_LIGHT_COLOUR),
                unlit: true,
                double_sided: true,
                cull_mode: None,
                ..default()
            }),
        }
    }

    /// Material a role is overridden with after the subtree pass.
    pub fn for_role(&self, role: NodeRole) -> Option<&Handle<StandardMaterial>> {
        match role {
            NodeRole::EnvironmentBase => Some(&self.baked),
            NodeRole::PoleLightA | NodeRole::PoleLightB => Some(&self.pole_light),
            NodeRole::PortalLight => Some(&self.portal_light),
            NodeRole::Interactive => None,
        }
    }

    /// Drop the baked texture after it failed to load; geometry stays visible untextured.
    pub fn strip_baked_texture(&self, materials: &mut Assets<StandardMaterial>) {
        for handle in [&self.baked, &self.baked_lit] {
            if let Some(material) = materials.get_mut(handle) {
                material.base_color_texture = None;
            }
        }
    }
}

pub fn hex_colour(hex: &str) -> Color {
    Srgba::hex(hex).map(Color::from).unwrap_or(Color::WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pole_lights_share_one_material() {
        let mut materials = Assets::<StandardMaterial>::default();
        let registry = MaterialRegistry::create(&mut materials, Handle::default());

        assert_eq!(
            registry.for_role(NodeRole::PoleLightA),
            registry.for_role(NodeRole::PoleLightB)
        );
        assert!(registry.for_role(NodeRole::Interactive).is_none());
        assert_eq!(materials.len(), 4);
    }

    #[test]
    fn portal_material_is_double_sided() {
        let mut materials = Assets::<StandardMaterial>::default();
        let registry = MaterialRegistry::create(&mut materials, Handle::default());
        let portal = materials.get(&registry.portal_light).unwrap();

        assert!(portal.double_sided);
        assert!(portal.cull_mode.is_none());
        assert!(portal.unlit);
    }

    #[test]
    fn stripping_texture_keeps_materials() {
        let mut materials = Assets::<StandardMaterial>::default();
        let registry = MaterialRegistry::create(&mut materials, Handle::default());
        registry.strip_baked_texture(&mut materials);

        assert!(materials.get(&registry.baked).unwrap().base_color_texture.is_none());
        assert!(materials.get(&registry.baked_lit).unwrap().base_color_texture.is_none());
    }
}
