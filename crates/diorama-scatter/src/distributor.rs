//! Seeded, label-driven object distribution.
//!
//! For each class: `floor(area * base_density * biome_weight)` trials. A
//! trial draws a footprint position from the class's own stream, checks the
//! class rule against the quadtree labels there, drops a ray onto the scene
//! and places an instance on the terrain hit. Rejected trials are not
//! retried, so the realised count never exceeds the target.

use diorama_context::ContextQuadtree;
use diorama_math::Bounds;
use diorama_mesh::Ray;
use diorama_scene::{AssetCache, DebugContext, NodeKind, RayOutcome, Scene, SceneHit};
use diorama_terrain::{Biome, Seed};
use glam::{Vec2, Vec3, Vec3Swizzles};

use crate::builder::ObjectBuilder;
use crate::object::ContextualObject;
use crate::registry::ObjectRegistry;

/// Result of one placement trial.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementOutcome {
    /// The class rule did not accept the labels at the position.
    RejectedByLabels,
    /// The ray hit nothing.
    Missed,
    /// The ray hit something other than open terrain first.
    Blocked,
    Placed { point: Vec3, underwater: bool },
}

impl PlacementOutcome {
    fn ray_outcome(self) -> Option<RayOutcome> {
        match self {
            PlacementOutcome::RejectedByLabels => None,
            PlacementOutcome::Missed => Some(RayOutcome::Miss),
            PlacementOutcome::Blocked => Some(RayOutcome::Blocked),
            PlacementOutcome::Placed { .. } => Some(RayOutcome::Placed),
        }
    }
}

/// Per-class distribution tally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassSummary {
    pub class: String,
    pub target: usize,
    pub placed: usize,
    pub underwater: usize,
    pub rejected_by_labels: usize,
    pub missed: usize,
    pub blocked: usize,
}

pub struct Distributor<'a> {
    seed: &'a Seed,
    bounds: Bounds,
    assets: &'a AssetCache,
}

impl<'a> Distributor<'a> {
    pub fn new(seed: &'a Seed, bounds: Bounds, assets: &'a AssetCache) -> Self {
        Self {
            seed,
            bounds,
            assets,
        }
    }

    /// Distribute every class of `biome`, in biome order. Placed objects are
    /// added to `scene` as they are created, so later rays can land on them.
    pub fn distribute(
        &self,
        registry: &ObjectRegistry,
        biome: &Biome,
        scene: &mut Scene,
        context: &mut ContextQuadtree,
        mut debug: Option<&mut DebugContext>,
    ) -> (Vec<ContextualObject>, Vec<ClassSummary>) {
        let mut objects = Vec::new();
        let mut summaries = Vec::new();
        for class in &biome.classes {
            let Some(builder) = registry.by_name(class) else {
                tracing::warn!(class = %class, biome = %biome.name, "object class not registered, skipped");
                continue;
            };
            if let Some(key) = &builder.config().asset {
                if !self.assets.contains(key) {
                    tracing::warn!(class = %class, asset = %key, "asset not prepared, using procedural fallback");
                }
            }
            let (placed, summary) =
                self.distribute_class(builder, biome.weight(class), scene, context, debug.as_deref_mut());
            objects.extend(placed);
            summaries.push(summary);
        }
        (objects, summaries)
    }

    /// Run the trials of one class at biome weight `weight`.
    pub fn distribute_class(
        &self,
        builder: &dyn ObjectBuilder,
        weight: f32,
        scene: &mut Scene,
        context: &mut ContextQuadtree,
        mut debug: Option<&mut DebugContext>,
    ) -> (Vec<ContextualObject>, ClassSummary) {
        let config = builder.config();
        let mut summary = ClassSummary {
            class: config.name.clone(),
            ..Default::default()
        };
        if let Some(missing) = config.missing_metadata() {
            tracing::warn!(class = %config.name, missing, "object class lacks metadata, skipped");
            return (Vec::new(), summary);
        }

        summary.target = config.target_count(self.bounds.footprint_area(), weight);
        let mut rng = self.seed.derive(&config.name).rng();
        let mut objects = Vec::new();

        for i in 0..summary.target {
            let x = (rng.next_f32() - 0.5) * self.bounds.x;
            let z = (rng.next_f32() - 0.5) * self.bounds.z;

            let eligible = context
                .labels(Vec2::new(x, z))
                .and_then(|labels| config.rule.evaluate(labels, &mut rng))
                .is_some();

            let outcome = if eligible {
                let ray = Ray::new(Vec3::new(x, self.bounds.y, z), Vec3::NEG_Y);
                let outcome = resolve_hits(&scene.raycast(&ray), scene, config.allow_underwater);
                if let (Some(debug), Some(ray_outcome)) = (debug.as_deref_mut(), outcome.ray_outcome()) {
                    debug.add_ray(
                        format!("{}-{i}", config.name),
                        ray.origin,
                        ray.direction,
                        self.bounds.y * 1.5,
                        ray_outcome,
                    );
                }
                outcome
            } else {
                PlacementOutcome::RejectedByLabels
            };

            match outcome {
                PlacementOutcome::RejectedByLabels => summary.rejected_by_labels += 1,
                PlacementOutcome::Missed => summary.missed += 1,
                PlacementOutcome::Blocked => summary.blocked += 1,
                PlacementOutcome::Placed { point, underwater } => {
                    let object = ContextualObject::build(
                        builder,
                        self.seed.offset(i as u64),
                        point,
                        self.bounds,
                        context.average_color(point.xz()),
                        underwater,
                        self.assets,
                    );
                    context.add_labels(object.labels.iter().map(String::as_str), point.xz());
                    scene.add(object.to_scene_node(format!("{}-{i}", config.name)));
                    summary.placed += 1;
                    if underwater {
                        summary.underwater += 1;
                    }
                    objects.push(object);
                }
            }
        }

        tracing::debug!(
            class = %summary.class,
            target = summary.target,
            placed = summary.placed,
            rejected = summary.rejected_by_labels,
            blocked = summary.blocked,
            missed = summary.missed,
            "distributed object class"
        );
        (objects, summary)
    }
}

/// Classify sorted ray hits. Underwater-tolerant classes look through water
/// surfaces to the first solid hit below.
fn resolve_hits(hits: &[SceneHit], scene: &Scene, allow_underwater: bool) -> PlacementOutcome {
    let Some(first) = hits.first() else {
        return PlacementOutcome::Missed;
    };
    let first_kind = &scene.node(first.node).kind;
    if first_kind.is_water() && allow_underwater {
        match hits.iter().find(|h| !scene.node(h.node).kind.is_water()) {
            Some(hit) if scene.node(hit.node).kind == NodeKind::Terrain => PlacementOutcome::Placed {
                point: hit.point,
                underwater: true,
            },
            Some(_) => PlacementOutcome::Blocked,
            None => PlacementOutcome::Missed,
        }
    } else if *first_kind == NodeKind::Terrain {
        PlacementOutcome::Placed {
            point: first.point,
            underwater: false,
        }
    } else {
        PlacementOutcome::Blocked
    }
}
