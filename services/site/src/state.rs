//! Application state shared across request handlers.

use std::sync::Arc;

use folio_notify::Pipeline;
use folio_scene::{Backdrop, Scene};

/// Shared application state.
///
/// This is passed to all request handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pipeline: Pipeline,
    environment: String,
    scenes: Scenes,
}

/// Scenes composed once from the backdrop and served read-only.
pub struct Scenes {
    pub animated: Scene,
    pub still: Scene,
    pub hero: Scene,
}

impl Scenes {
    pub fn compose(backdrop: &Backdrop) -> Self {
        Self {
            animated: Scene::animated(backdrop),
            still: Scene::still(),
            hero: Scene::hero(&backdrop.particles),
        }
    }
}

impl AppState {
    /// Create a new application state.
    pub fn new(pipeline: Pipeline, environment: impl Into<String>, backdrop: &Backdrop) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pipeline,
                environment: environment.into(),
                scenes: Scenes::compose(backdrop),
            }),
        }
    }

    /// Get the delivery pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.inner.pipeline
    }

    pub fn environment(&self) -> &str {
        &self.inner.environment
    }

    pub fn scenes(&self) -> &Scenes {
        &self.inner.scenes
    }
}
