//! Scroller demo application
//!
//! Builds a scene from an optional config file, steps it with a fixed
//! 60 Hz clock and logs what each frame would upload to the GPU.
//!
//! Usage: `scroller_demo [scene.toml|scene.ron] [font.toml|font.ron]`

use scroll_engine::foundation::logging;
use scroll_engine::prelude::*;

const FRAME_MILLIS: f64 = 1000.0 / 60.0;
const FRAME_COUNT: u64 = 600;

/// Demo failures
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("Failed to load {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("Failed to build scene: {0}")]
    Build(#[from] BuildError),
}

fn load<T: Config>(path: Option<&String>, what: &str) -> Result<T, AppError> {
    match path {
        Some(path) => {
            log::info!("Loading {what} from {path}");
            T::load_from_file(path).map_err(|source| AppError::Config {
                path: path.clone(),
                source,
            })
        }
        None => {
            log::info!("No {what} file given, using defaults");
            Ok(T::default())
        }
    }
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config: SceneConfig = load(args.first(), "scene")?;
    let font: FontData = load(args.get(1), "font")?;

    let mut scene = Scene::build(&config, &font)?;
    let meshes = scene.meshes();
    let mesh_bytes: usize = meshes.iter().map(|(_, mesh)| mesh.vertex_bytes().len()).sum();
    for (name, mesh) in &meshes {
        log::debug!("Mesh '{name}': {} triangles", mesh.triangle_count());
    }
    log::info!("Uploading {} meshes, {mesh_bytes} vertex bytes", meshes.len());

    let mut clock = FixedStepClock::new(FRAME_MILLIS);
    let mut wall = FrameClock::new();
    let mut uploaded_bytes = 0usize;

    while clock.frame_count() < FRAME_COUNT {
        let time = clock.tick();
        wall.tick();
        scene.render(time);
        let visible = scene.stats().visible_instances;
        let batches = scene.collect_uploads();
        let bytes: usize = batches.iter().map(|batch| batch.bytes.len()).sum();
        uploaded_bytes += bytes;
        log::debug!(
            "Frame {} at {time:.1} ms: {visible} instances, {} batches, {bytes} bytes",
            clock.frame_count(),
            batches.len()
        );
        for batch in &batches {
            log::trace!("  {}: {} instances", batch.name, batch.instance_count);
        }
    }

    let stats = scene.stats();
    log::info!(
        "Simulated {} frames in {:.1} ms of wall time",
        wall.frame_count(),
        wall.elapsed_millis()
    );
    log::info!(
        "Last frame: {} parts, {} pools, {} instances visible, {uploaded_bytes} bytes uploaded",
        stats.parts,
        stats.pools,
        stats.visible_instances
    );
    Ok(())
}

fn main() {
    logging::init();
    log::info!("Starting scroller demo");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
