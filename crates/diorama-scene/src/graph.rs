//! Flat scene graph: the diorama root owns an ordered list of child nodes,
//! each a group of meshes under one transform.

use diorama_mesh::{Aabb, Ray};
use glam::{Mat4, Quat, Vec3};

use crate::MeshInstance;

/// Translation, rotation and scale of a node relative to the diorama root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What a node represents. Placement raycasts use this to tell the terrain
/// surface apart from water, props and scenery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Terrain,
    TerrainSide,
    Water,
    WaterSide,
    Base,
    Floor,
    /// A distributed prop of the named class.
    Object(String),
}

impl NodeKind {
    pub fn is_water(&self) -> bool {
        matches!(self, NodeKind::Water | NodeKind::WaterSide)
    }
}

/// A group of meshes sharing one transform.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    pub meshes: Vec<MeshInstance>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::IDENTITY,
            meshes: Vec::new(),
        }
    }

    pub fn with_mesh(mut self, mesh: MeshInstance) -> Self {
        self.meshes.push(mesh);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// World-space bounding box over all meshes.
    pub fn world_aabb(&self) -> Option<Aabb> {
        let m = self.transform.matrix();
        Aabb::from_points(
            self.meshes
                .iter()
                .flat_map(|mi| mi.mesh.positions.iter())
                .map(|p| m.transform_point3(*p)),
        )
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|mi| mi.mesh.triangle_count()).sum()
    }
}

/// Index of a node in its [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// One ray/triangle intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneHit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

/// The children of a diorama root, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    bounds: Vec<Option<Aabb>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a child node. Its world bounds are cached for raycasting, so
    /// nodes are treated as immutable once added.
    pub fn add(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.bounds.push(node.world_aabb());
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes of a given kind.
    pub fn nodes_of_kind<'a>(&'a self, kind: &'a NodeKind) -> impl Iterator<Item = &'a SceneNode> {
        self.nodes.iter().filter(move |n| &n.kind == kind)
    }

    /// Bounding box of everything in the scene.
    pub fn world_aabb(&self) -> Option<Aabb> {
        self.bounds
            .iter()
            .flatten()
            .copied()
            .reduce(|a, b| a.union(&b))
    }

    /// Intersects `ray` with every triangle of every node and returns all
    /// hits sorted by distance, nearest first.
    pub fn raycast(&self, ray: &Ray) -> Vec<SceneHit> {
        let mut hits = Vec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            let Some(aabb) = self.bounds[i] else {
                continue;
            };
            if aabb.intersect_ray(ray).is_none() {
                continue;
            }
            let matrix = node.transform.matrix();
            for instance in &node.meshes {
                let world = instance.mesh.transformed(&matrix);
                hits.extend(world.raycast_all(ray).into_iter().map(|distance| SceneHit {
                    node: NodeId(i),
                    distance,
                    point: ray.at(distance),
                }));
            }
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
