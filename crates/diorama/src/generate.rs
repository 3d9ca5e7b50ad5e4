//! One complete generation pass.

use std::time::{Duration, Instant};

use diorama_config::DioramaConfig;
use diorama_context::ContextQuadtree;
use diorama_math::{Bounds, Color};
use diorama_scatter::{ClassSummary, ContextualObject, Distributor, ObjectRegistry};
use diorama_scene::{
    AssetCache, DebugContext, Light, Material, MeshInstance, NodeKind, Scene, SceneNode,
};
use diorama_terrain::{Biome, BiomeRegistry, Terrain, TerrainBuilder, WaterSurface, build_water};
use diorama_terrain::water::CURVE_DIVISIONS;

use crate::scenery::{base_node, debug_shadow_frustum, floor_node, lights};

const WATER_ROUGHNESS: f32 = 0.1;
const WATER_CURVE_COLOR: u32 = 0xff00ff;

/// A generated diorama. Owns everything it produced; dropping it tears the
/// whole diorama down.
#[derive(Debug)]
pub struct Diorama {
    /// The sanitized configuration this diorama was built from.
    pub config: DioramaConfig,
    pub biome: Biome,
    pub scene: Scene,
    pub lights: Vec<Light>,
    pub context: ContextQuadtree,
    pub terrain: Terrain,
    pub water: Option<WaterSurface>,
    pub objects: Vec<ContextualObject>,
    pub summaries: Vec<ClassSummary>,
    /// Helpers collected when the configuration asked for debug output.
    pub debug: Option<DebugContext>,
    pub elapsed: Duration,
}

impl Diorama {
    /// Build from `config`, collecting debug helpers when `config.debug` is set.
    pub fn generate(config: &DioramaConfig, assets: &AssetCache) -> Self {
        let mut debug = config.debug.then(DebugContext::new);
        let mut diorama = build_diorama(config, assets, debug.as_mut());
        diorama.debug = debug;
        diorama
    }

    pub fn bounds(&self) -> Bounds {
        self.config.bounds()
    }

    /// Placed instances of `class`.
    pub fn object_count(&self, class: &str) -> usize {
        self.objects.iter().filter(|o| o.class == class).count()
    }

    pub fn summary(&self, class: &str) -> Option<&ClassSummary> {
        self.summaries.iter().find(|s| s.class == class)
    }
}

/// Generate a diorama from `config`. Never fails: unknown biomes fall back
/// to the first registered biome, and rejected placements only lower the
/// object count.
pub fn build_diorama(
    config: &DioramaConfig,
    assets: &AssetCache,
    mut debug: Option<&mut DebugContext>,
) -> Diorama {
    let start = Instant::now();
    let config = config.sanitized();
    let bounds = config.bounds();
    tracing::info!(
        seed = %config.seed,
        x = bounds.x,
        y = bounds.y,
        z = bounds.z,
        "creating diorama"
    );

    let biomes = BiomeRegistry::with_defaults();
    let biome = biomes
        .resolve(&config.biome.name)
        .cloned()
        .unwrap_or_else(Biome::temperate)
        .with_weight_overrides(&config.biome.weights);

    let mut context = ContextQuadtree::new(bounds.footprint());
    let terrain =
        TerrainBuilder::new(bounds, &config.seed, &config.water, biome.palette).build(&mut context);

    let mut scene = Scene::new();
    scene.add(
        SceneNode::new("terrain", NodeKind::Terrain).with_mesh(MeshInstance::new(
            terrain.mesh.clone(),
            Material::new(Color::WHITE).with_vertex_colors(),
        )),
    );
    for (i, (_, side)) in terrain.sides.iter().enumerate() {
        scene.add(
            SceneNode::new(format!("terrain-side-{i}"), NodeKind::TerrainSide)
                .with_mesh(MeshInstance::new(side.clone(), Material::new(terrain.palette.side))),
        );
    }

    let water = build_water(bounds, &config.water);
    if let Some(water) = &water {
        let material = Material::new(biome.water.color)
            .with_opacity(biome.water.opacity)
            .with_roughness(WATER_ROUGHNESS);
        scene.add(
            SceneNode::new("water", NodeKind::Water)
                .with_mesh(MeshInstance::new(water.surface.clone(), material.clone()).without_shadows()),
        );
        for (i, (_, side)) in water.sides.iter().enumerate() {
            scene.add(
                SceneNode::new(format!("water-side-{i}"), NodeKind::WaterSide)
                    .with_mesh(MeshInstance::new(side.clone(), material.clone()).without_shadows()),
            );
        }
    }

    scene.add(base_node(bounds));
    scene.add(floor_node(bounds));

    let registry = ObjectRegistry::with_defaults();
    let (objects, summaries) = Distributor::new(&config.seed, bounds, assets).distribute(
        &registry,
        &biome,
        &mut scene,
        &mut context,
        debug.as_deref_mut(),
    );

    let lights = lights(bounds);

    if let Some(debug) = debug {
        let half = bounds.half();
        debug.add_box("bounds", -half, half, Color::WHITE);
        if let Some(curve) = &terrain.water_curve {
            debug.add_line(
                "water-curve",
                curve.points(CURVE_DIVISIONS),
                Color::from_hex(WATER_CURVE_COLOR),
            );
        }
        for light in &lights {
            if let Light::Directional {
                position,
                shadow: Some(shadow),
                ..
            } = light
            {
                debug_shadow_frustum(debug, *position, shadow);
            }
        }
    }

    let elapsed = start.elapsed();
    tracing::info!(
        elapsed_s = elapsed.as_secs_f64(),
        objects = objects.len(),
        nodes = scene.len(),
        "generated diorama"
    );

    Diorama {
        config,
        biome,
        scene,
        lights,
        context,
        terrain,
        water,
        objects,
        summaries,
        debug: None,
        elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diorama_scene::RayOutcome;
    use diorama_terrain::Seed;

    fn small_config(seed: i64) -> DioramaConfig {
        let mut config = DioramaConfig::default();
        config.seed = Seed::Number(seed);
        config.bounds.x = 16.0;
        config.bounds.z = 12.0;
        config
    }

    #[test]
    fn test_scene_layout() {
        let diorama = build_diorama(&small_config(1), &AssetCache::new(), None);
        let kinds = |kind: NodeKind| diorama.scene.nodes_of_kind(&kind).count();
        assert_eq!(kinds(NodeKind::Terrain), 1);
        assert_eq!(kinds(NodeKind::TerrainSide), 4);
        assert_eq!(kinds(NodeKind::Water), 1);
        assert_eq!(kinds(NodeKind::WaterSide), 4);
        assert_eq!(kinds(NodeKind::Base), 1);
        assert_eq!(kinds(NodeKind::Floor), 1);
        assert_eq!(diorama.scene.len(), 12 + diorama.objects.len());
        assert_eq!(diorama.lights.len(), 2);
        assert!(diorama.debug.is_none());
    }

    #[test]
    fn test_no_water_when_disabled() {
        let mut config = small_config(1);
        config.water.enabled = false;
        let diorama = build_diorama(&config, &AssetCache::new(), None);
        assert!(diorama.water.is_none());
        assert!(diorama.terrain.water_curve.is_none());
        assert!(diorama.objects.iter().all(|o| !o.underwater));
    }

    #[test]
    fn test_unknown_biome_falls_back() {
        let mut config = small_config(3);
        config.biome.name = "volcanic".into();
        let diorama = build_diorama(&config, &AssetCache::new(), None);
        assert_eq!(diorama.biome.name, "temperate");
    }

    #[test]
    fn test_weight_override_applies() {
        let mut config = small_config(4);
        config.biome.weights.insert("tree".into(), 0.0);
        let diorama = build_diorama(&config, &AssetCache::new(), None);
        assert_eq!(diorama.object_count("tree"), 0);
        assert_eq!(diorama.summary("tree").map(|s| s.target), Some(0));
    }

    #[test]
    fn test_config_is_sanitized() {
        let mut config = small_config(5);
        config.bounds.y = 1.0;
        let diorama = build_diorama(&config, &AssetCache::new(), None);
        assert_eq!(diorama.bounds().y, 5.0);
    }

    #[test]
    fn test_debug_helpers_collected() {
        let mut config = small_config(6);
        config.debug = true;
        let diorama = Diorama::generate(&config, &AssetCache::new());
        let debug = diorama.debug.as_ref().unwrap();
        assert!(debug.lines.iter().any(|l| l.label == "bounds"));
        assert!(debug.lines.iter().any(|l| l.label == "water-curve"));
        assert!(debug.lines.iter().any(|l| l.label == "sun-frustum-near"));
        let placed: usize = diorama.summaries.iter().map(|s| s.placed).sum();
        assert_eq!(debug.count_rays(RayOutcome::Placed), placed);
    }
}
