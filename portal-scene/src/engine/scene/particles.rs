use crate::engine::shaders::{ATTRIBUTE_PARTICLE_SCALE, FireflyMaterial, FireflyUniform};
use crate::engine::systems::debug_settings::DebugSettings;
use crate::engine::systems::viewport::ViewportState;
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::view::NoFrustumCulling;
use constants::particles::{PARTICLE_COUNT, VERTICES_PER_PARTICLE, VOLUME_MAX, VOLUME_MIN};
use rand::Rng;

/// Quad corners of the two triangles emitted per particle.
const QUAD_CORNERS: [[f32; 2]; VERTICES_PER_PARTICLE] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
];

/// Positions and scales sampled once at startup; never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBuffer {
    positions: Vec<Vec3>,
    scales: Vec<f32>,
}

impl ParticleBuffer {
    /// Uniformly sample `count` particles inside the box `min..max`.
    pub fn generate(count: usize, min: Vec3, max: Vec3, rng: &mut impl Rng) -> Self {
        let extent = max - min;
        let positions = (0..count)
            .map(|_| min + extent * Vec3::new(rng.r#gen(), rng.r#gen(), rng.r#gen()))
            .collect();
        let scales = (0..count).map(|_| rng.r#gen::<f32>()).collect();

        Self { positions, scales }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Six vertices per particle sharing its centre; the vertex stage spreads
    /// them into a screen-aligned quad using the corner UVs.
    pub fn to_mesh(&self) -> Mesh {
        let vertex_count = self.len() * VERTICES_PER_PARTICLE;
        let mut centres = Vec::with_capacity(vertex_count);
        let mut corners = Vec::with_capacity(vertex_count);
        let mut scales = Vec::with_capacity(vertex_count);

        for (position, scale) in self.positions.iter().zip(&self.scales) {
            for corner in QUAD_CORNERS {
                centres.push(position.to_array());
                corners.push(corner);
                scales.push(*scale);
            }
        }

        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, centres)
            .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, corners)
            .with_inserted_attribute(ATTRIBUTE_PARTICLE_SCALE, scales)
    }
}

#[derive(Component)]
pub struct Fireflies;

/// The shared firefly material, target of the per-frame uniform pushes.
#[derive(Resource, Debug, Clone)]
pub struct FireflyLayer {
    pub material: Handle<FireflyMaterial>,
}

// Startup: the effect layer does not wait for the environment.
pub fn spawn_fireflies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<FireflyMaterial>>,
    viewport: Res<ViewportState>,
    settings: Res<DebugSettings>,
) {
    let buffer = ParticleBuffer::generate(
        PARTICLE_COUNT,
        VOLUME_MIN,
        VOLUME_MAX,
        &mut rand::thread_rng(),
    );

    let material = materials.add(FireflyMaterial {
        uniform: FireflyUniform::new(viewport.pixel_ratio(), settings.particle_size),
    });

    commands.spawn((
        Name::new("fireflies"),
        Fireflies,
        Mesh3d(meshes.add(buffer.to_mesh())),
        MeshMaterial3d(material.clone()),
        Transform::default(),
        NoFrustumCulling,
        NotShadowCaster,
        NotShadowReceiver,
    ));
    commands.insert_resource(FireflyLayer { material });

    info!("✓ {} fireflies spawned", buffer.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn buffer_has_configured_count_within_volume() {
        let mut rng = StdRng::seed_from_u64(7);
        let buffer = ParticleBuffer::generate(PARTICLE_COUNT, VOLUME_MIN, VOLUME_MAX, &mut rng);

        assert_eq!(buffer.len(), PARTICLE_COUNT);
        assert_eq!(buffer.scales().len(), PARTICLE_COUNT);
        for position in buffer.positions() {
            assert!(position.cmpge(VOLUME_MIN).all(), "{position} below volume");
            assert!(position.cmple(VOLUME_MAX).all(), "{position} above volume");
        }
        for scale in buffer.scales() {
            assert!((0.0..1.0).contains(scale));
        }
    }

    #[test]
    fn same_seed_same_buffer() {
        let first = ParticleBuffer::generate(
            PARTICLE_COUNT,
            VOLUME_MIN,
            VOLUME_MAX,
            &mut StdRng::seed_from_u64(11),
        );
        let second = ParticleBuffer::generate(
            PARTICLE_COUNT,
            VOLUME_MIN,
            VOLUME_MAX,
            &mut StdRng::seed_from_u64(11),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn mesh_expands_each_particle_into_a_quad() {
        let buffer =
            ParticleBuffer::generate(3, VOLUME_MIN, VOLUME_MAX, &mut StdRng::seed_from_u64(3));
        let mesh = buffer.to_mesh();

        assert_eq!(mesh.count_vertices(), 3 * VERTICES_PER_PARTICLE);

        let Some(VertexAttributeValues::Float32x3(centres)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("positions missing");
        };
        let Some(VertexAttributeValues::Float32(scales)) = mesh.attribute(ATTRIBUTE_PARTICLE_SCALE)
        else {
            panic!("scales missing");
        };

        // Every vertex of the second quad carries the second particle.
        let second = buffer.positions()[1].to_array();
        for vertex in VERTICES_PER_PARTICLE..2 * VERTICES_PER_PARTICLE {
            assert_eq!(centres[vertex], second);
            assert_eq!(scales[vertex], buffer.scales()[1]);
        }
    }
}
