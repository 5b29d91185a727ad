//! Backdrop scenes.
//!
//! Only the home section gets the animated backdrop; every other section gets
//! the still one.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use folio_scene::Scene;
use serde::Deserialize;

use crate::state::AppState;

const HOME: &str = "home";

#[derive(Debug, Deserialize)]
pub struct SceneQuery {
    pub section: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/scene", get(backdrop))
        .route("/scene/hero", get(hero))
}

async fn backdrop(State(state): State<AppState>, Query(query): Query<SceneQuery>) -> Json<Scene> {
    let section = query.section.as_deref().unwrap_or(HOME);
    let scenes = state.scenes();
    if section == HOME {
        Json(scenes.animated.clone())
    } else {
        Json(scenes.still.clone())
    }
}

async fn hero(State(state): State<AppState>) -> Json<Scene> {
    Json(state.scenes().hero.clone())
}
