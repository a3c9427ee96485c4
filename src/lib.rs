//! Heating cost, crop revenue and net profit estimation for fig greenhouses.
//!
//! Results are meant for comparing greenhouse configurations against each
//! other, not for sizing heating plant.

pub mod api_docs;
pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod shared_state;

use axum::{response::Html, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::routes::analysis_routes::api_routes;
use crate::shared_state::AppState;

/// Full HTTP application: `/api` routes, Scalar UI and request tracing.
pub fn create_router(config: &Config, state: AppState) -> Router {
    let app = Router::new()
        .nest("/api", api_routes(state))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .layer(TraceLayer::new_for_http());

    if config.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
