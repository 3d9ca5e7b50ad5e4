//! Command-line harness: loads the session settings, applies CLI overrides,
//! prepares assets, generates one diorama and logs what it contains.
//!
//! Run with `cargo run -p diorama-demo -- --seed 2655 --biome desert`.

mod models;

use clap::Parser;
use diorama::{DioramaHost, prepare};
use diorama_config::{CliArgs, SessionStore};
use diorama_scene::NodeKind;
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();

    let store = match args.session_dir.clone() {
        Some(dir) => Some(SessionStore::new(dir)),
        None => SessionStore::open_default().ok(),
    };

    let log_dir = store.as_ref().map(|s| s.dir().join("logs"));
    diorama_log::init_logging(
        log_dir.as_deref(),
        cfg!(debug_assertions),
        args.log_level.as_deref(),
    );

    let mut config = match &store {
        Some(store) => store.load_config().unwrap_or_else(|e| {
            warn!("failed to load session config: {e}, using defaults");
            Default::default()
        }),
        None => {
            warn!("no session directory, using defaults");
            Default::default()
        }
    };
    config.apply_cli_overrides(&args);

    let assets = match pollster::block_on(prepare(&models::BuiltinModels)) {
        Ok(assets) => assets,
        Err(e) => {
            error!("asset preparation failed: {e}");
            return;
        }
    };
    info!(models = assets.len(), "assets prepared");

    let mut host = DioramaHost::new(assets);
    host.regenerate(&config);
    let Some(diorama) = host.current() else {
        return;
    };

    let bounds = diorama.bounds();
    info!(
        seed = %diorama.config.seed,
        biome = %diorama.biome.name,
        "diorama {}x{}x{}",
        bounds.x,
        bounds.y,
        bounds.z
    );
    info!(
        vertices = diorama.terrain.mesh.vertex_count(),
        triangles = diorama.terrain.mesh.triangle_count(),
        quads = diorama.context.node_count(),
        "terrain"
    );
    if let Some(water) = &diorama.water {
        info!(height = water.height, "water");
    }
    for summary in &diorama.summaries {
        info!(
            class = %summary.class,
            placed = summary.placed,
            target = summary.target,
            underwater = summary.underwater,
            rejected = summary.rejected_by_labels,
            blocked = summary.blocked,
            missed = summary.missed,
            "objects"
        );
    }
    let objects = diorama
        .scene
        .nodes()
        .iter()
        .filter(|n| matches!(n.kind, NodeKind::Object(_)))
        .count();
    info!(
        nodes = diorama.scene.len(),
        objects,
        lights = diorama.lights.len(),
        elapsed_ms = diorama.elapsed.as_millis() as u64,
        "scene"
    );
    if let Some(dbg_info) = &diorama.debug {
        info!(lines = dbg_info.lines.len(), rays = dbg_info.rays.len(), "debug helpers");
    }

    if let Some(store) = &store
        && let Err(e) = store.save_config(&diorama.config)
    {
        warn!("failed to save session config: {e}");
    }
}
