use diorama::{Diorama, DioramaConfig, build_diorama};
use diorama_context::labels::{GROUND, TREE};
use diorama_scene::AssetCache;
use diorama_terrain::Seed;

fn example_config() -> DioramaConfig {
    let mut config = DioramaConfig::default();
    config.seed = Seed::Number(2655);
    config.bounds.x = 48.0;
    config.bounds.y = 16.0;
    config.bounds.z = 32.0;
    config.biome.name = "temperate".into();
    config.water.enabled = true;
    config.water.level = 0.25;
    config
}

fn generate(config: &DioramaConfig) -> Diorama {
    build_diorama(config, &AssetCache::new(), None)
}

#[test]
fn test_example_scenario() {
    let diorama = generate(&example_config());

    assert!(diorama.terrain.mesh.vertex_count() > 0, "terrain mesh is non-empty");
    assert!(diorama.terrain.mesh.triangle_count() > 0);
    let water = diorama.water.as_ref().expect("water enabled at level 0.25");
    assert!((water.height - (-8.0 + 16.0 * 0.25)).abs() < 1e-4);

    let trees = diorama.summary("tree").expect("temperate distributes trees");
    let expected = (48.0_f32 * 32.0 * 0.1 * 0.4).floor() as usize;
    assert_eq!(trees.target, expected);
    assert_eq!(trees.target, 61);
    assert!(trees.placed <= trees.target);
    assert_eq!(diorama.object_count("tree"), trees.placed);
}

#[test]
fn test_generation_is_deterministic() {
    let a = generate(&example_config());
    let b = generate(&example_config());

    assert_eq!(a.terrain.heights.values(), b.terrain.heights.values());
    assert_eq!(a.terrain.mesh.positions, b.terrain.mesh.positions);
    assert_eq!(a.terrain.mesh.colors, b.terrain.mesh.colors);
    assert_eq!(a.summaries, b.summaries);
    assert_eq!(a.context.node_count(), b.context.node_count());
    assert_eq!(a.context.root().labels(), b.context.root().labels());

    let placements = |d: &Diorama| {
        d.objects
            .iter()
            .map(|o| (o.class.clone(), o.position, o.rotation, o.scale))
            .collect::<Vec<_>>()
    };
    assert_eq!(placements(&a), placements(&b));
}

#[test]
fn test_different_seeds_differ() {
    let a = generate(&example_config());
    let mut other = example_config();
    other.seed = Seed::Number(2656);
    let b = generate(&other);
    assert_ne!(a.terrain.heights.values(), b.terrain.heights.values());
}

#[test]
fn test_counts_never_exceed_targets() {
    for biome in ["temperate", "desert", "arctic"] {
        for seed in [1, 2655, 5000] {
            let mut config = example_config();
            config.seed = Seed::Number(seed);
            config.biome.name = biome.into();
            let diorama = generate(&config);
            for summary in &diorama.summaries {
                assert!(
                    summary.placed <= summary.target,
                    "{biome}/{seed}: {} placed {} of {}",
                    summary.class,
                    summary.placed,
                    summary.target
                );
                assert_eq!(diorama.object_count(&summary.class), summary.placed);
            }
        }
    }
}

#[test]
fn test_labels_fed_back_into_context() {
    let diorama = generate(&example_config());
    let root = diorama.context.root();
    assert!(root.label_count(GROUND) > 0, "terrain labels its surface");
    assert_eq!(
        root.label_count(TREE) as usize,
        diorama.object_count("tree"),
        "each placed tree adds one label at the root"
    );
}

#[test]
fn test_terrain_stays_inside_volume() {
    let diorama = generate(&example_config());
    let bounds = diorama.bounds();
    for p in &diorama.terrain.mesh.positions {
        assert!(p.y >= bounds.floor() + 1.0 - 1e-4, "trough clamp violated at {p}");
        assert!(p.y <= bounds.ceiling() + 1e-4);
    }
}

#[test]
fn test_unprepared_asset_uses_fallback() {
    let mut config = example_config();
    config.biome.name = "desert".into();
    let diorama = generate(&config);
    for cactus in diorama.objects.iter().filter(|o| o.class == "cactus") {
        assert!(!cactus.meshes.is_empty(), "procedural cactus has geometry");
    }
}
