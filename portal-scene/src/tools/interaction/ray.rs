use crate::engine::assets::node_roles::NodeMatcher;
use bevy::prelude::*;
use bevy::render::camera::CameraProjection;

/// Window cursor (top-left origin, logical px) to normalised device
/// coordinates with y pointing up. `None` outside the window.
pub fn cursor_to_ndc(cursor: Vec2, window_size: Vec2) -> Option<Vec2> {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }
    let ndc = Vec2::new(
        cursor.x / window_size.x * 2.0 - 1.0,
        1.0 - cursor.y / window_size.y * 2.0,
    );
    (ndc.abs().max_element() <= 1.0).then_some(ndc)
}

/// Ray from the near plane through `ndc`, unprojected with the camera's
/// projection. Bevy uses reverse depth, so the near plane sits at z = 1.
pub fn ray_from_ndc(
    projection: &Projection,
    camera_transform: &GlobalTransform,
    ndc: Vec2,
) -> Option<Ray3d> {
    let world_from_ndc =
        camera_transform.compute_matrix() * projection.get_clip_from_view().inverse();
    let near = world_from_ndc.project_point3(ndc.extend(1.0));
    let far = world_from_ndc.project_point3(ndc.extend(f32::EPSILON));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// One ray hit with the names that can identify its node: glTF meshes hang
/// below the named node they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct PickCandidate {
    pub entity: Entity,
    pub distance: f32,
    pub name: Option<String>,
    pub parent_name: Option<String>,
}

impl PickCandidate {
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.parent_name.as_deref())
            .unwrap_or("unnamed")
    }

    fn matches(&self, prefix: &str) -> bool {
        [&self.name, &self.parent_name]
            .into_iter()
            .flatten()
            .any(|name| NodeMatcher::Prefix(prefix).matches(name))
    }
}

/// Nearest hit whose node name starts with `prefix`.
pub fn first_interactive<'a>(candidates: &'a [PickCandidate], prefix: &str) -> Option<&'a PickCandidate> {
    candidates
        .iter()
        .filter(|candidate| candidate.matches(prefix))
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
