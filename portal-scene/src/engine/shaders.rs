/// Firefly particle material: camera-facing quads expanded in the vertex stage
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::render::mesh::{MeshVertexAttribute, MeshVertexBufferLayoutRef};
use bevy::render::render_resource::{
    RenderPipelineDescriptor, ShaderType, SpecializedMeshPipelineError, VertexFormat,
};
use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef},
};
use constants::asset_paths::FIREFLY_SHADER;

/// Per-particle size factor in [0, 1).
pub const ATTRIBUTE_PARTICLE_SCALE: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_ParticleScale", 988_540_917, VertexFormat::Float32);

#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
#[repr(C)]
pub struct FireflyUniform {
    /// Seconds since startup.
    pub time: f32,
    /// Device pixel ratio, already capped.
    pub pixel_ratio: f32,
    /// Global size multiplier in pixels.
    pub size: f32,
    pub _padding: f32,
}

impl FireflyUniform {
    pub fn new(pixel_ratio: f32, size: f32) -> Self {
        Self {
            time: 0.0,
            pixel_ratio,
            size,
            _padding: 0.0,
        }
    }
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct FireflyMaterial {
    #[uniform(0)]
    pub uniform: FireflyUniform,
}

impl Material for FireflyMaterial {
    fn vertex_shader() -> ShaderRef {
        FIREFLY_SHADER.into()
    }

    fn fragment_shader() -> ShaderRef {
        FIREFLY_SHADER.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
            ATTRIBUTE_PARTICLE_SCALE.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];

        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}
