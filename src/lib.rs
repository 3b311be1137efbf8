pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod logging;
pub mod pacing;
pub mod tone;
pub mod transform;
pub mod viewer;

pub use error::{AppError, AppResult};
pub use viewer::{Viewer, ViewerCommand, ViewerRequest};

/// Builds a viewer session for host shells and integration tests: initializes
/// logging, loads the interaction tunables, and wires the facade.
pub fn start(viewport: geometry::Viewport) -> Viewer {
    logging::init();
    let config = config::load_viewer_config();
    tracing::info!(?config, "starting easel viewer");
    Viewer::new(config, viewport)
}
