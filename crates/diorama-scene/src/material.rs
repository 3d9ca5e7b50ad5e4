//! Surface materials and mesh/material pairs.

use diorama_math::Color;
use diorama_mesh::Mesh;

/// PBR-ish surface description consumed by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    /// `1.0` is fully opaque.
    pub opacity: f32,
    /// Use the mesh's per-vertex colours instead of `color`.
    pub vertex_colors: bool,
}

impl Material {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            roughness: 0.6,
            metalness: 0.0,
            opacity: 1.0,
            vertex_colors: false,
        }
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_vertex_colors(mut self) -> Self {
        self.vertex_colors = true;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

/// A mesh drawn with one material.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshInstance {
    pub mesh: Mesh,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshInstance {
    /// A shadow casting and receiving mesh.
    pub fn new(mesh: Mesh, material: Material) -> Self {
        Self {
            mesh,
            material,
            cast_shadow: true,
            receive_shadow: true,
        }
    }

    pub fn without_shadows(mut self) -> Self {
        self.cast_shadow = false;
        self.receive_shadow = false;
        self
    }
}
