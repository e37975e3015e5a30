use bevy::prelude::*;
use constants::scene_nodes::{BAKED_NODE, POLE_LIGHT_A_NODE, POLE_LIGHT_B_NODE, PORTAL_LIGHT_NODE};
use std::collections::HashMap;
use std::fmt;

/// Parts of the environment the scene treats specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    EnvironmentBase,
    PoleLightA,
    PoleLightB,
    PortalLight,
    Interactive,
}

impl NodeRole {
    pub const ALL: [NodeRole; 5] = [
        NodeRole::EnvironmentBase,
        NodeRole::PoleLightA,
        NodeRole::PoleLightB,
        NodeRole::PortalLight,
        NodeRole::Interactive,
    ];

    /// How a node is recognised as filling this role.
    pub fn matcher(self, interactive_prefix: &str) -> NodeMatcher<'_> {
        match self {
            NodeRole::EnvironmentBase => NodeMatcher::Exact(BAKED_NODE),
            NodeRole::PoleLightA => NodeMatcher::Exact(POLE_LIGHT_A_NODE),
            NodeRole::PoleLightB => NodeMatcher::Exact(POLE_LIGHT_B_NODE),
            NodeRole::PortalLight => NodeMatcher::Exact(PORTAL_LIGHT_NODE),
            NodeRole::Interactive => NodeMatcher::Prefix(interactive_prefix),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeRole::EnvironmentBase => "environment-base",
            NodeRole::PoleLightA => "pole-light-a",
            NodeRole::PoleLightB => "pole-light-b",
            NodeRole::PortalLight => "portal-light",
            NodeRole::Interactive => "interactive",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMatcher<'a> {
    Exact(&'a str),
    Prefix(&'a str),
}

impl NodeMatcher<'_> {
    pub fn matches(&self, name: &str) -> bool {
        let name = sanitize_node_name(name);
        match self {
            NodeMatcher::Exact(expected) => name == sanitize_node_name(expected),
            NodeMatcher::Prefix(prefix) => name.starts_with(&sanitize_node_name(prefix)),
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            NodeMatcher::Exact(name) | NodeMatcher::Prefix(name) => name,
        }
    }
}

/// Normalise exporter node names: `Cylinder.001` and `Cylinder001` compare equal.
pub fn sanitize_node_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '.' | ':' | '/' | '[' | ']'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Role to entity mapping, resolved once when the environment is integrated.
#[derive(Debug, Clone, Default)]
pub struct NodeRoles {
    nodes: HashMap<NodeRole, Entity>,
}

impl NodeRoles {
    /// Resolve roles against named nodes in traversal order. The first match wins.
    pub fn resolve<'a>(
        candidates: impl IntoIterator<Item = (Entity, &'a str)>,
        interactive_prefix: &str,
    ) -> Self {
        let mut nodes = HashMap::default();
        for (entity, name) in candidates {
            for role in NodeRole::ALL {
                if !nodes.contains_key(&role) && role.matcher(interactive_prefix).matches(name) {
                    nodes.insert(role, entity);
                }
            }
        }
        Self { nodes }
    }

    pub fn get(&self, role: NodeRole) -> Option<Entity> {
        self.nodes.get(&role).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
