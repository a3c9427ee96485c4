use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::controllers::analysis_controller::{
    // Reference data
    list_insulation_grades, list_regions,
    // Computation
    compute_geometry, run_analysis,
    // Export
    export_daily, export_summary,
    health,
};
use crate::middleware::auth::require_access_key;
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router. Everything except `/health` sits behind the
/// access-key layer.
pub fn api_routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/regions",              get(list_regions))
        .route("/insulation-grades",    get(list_insulation_grades))
        .route("/geometry",             post(compute_geometry))
        .route("/analysis",             post(run_analysis))
        .route("/analysis/daily.csv",   post(export_daily))
        .route("/analysis/summary.csv", post(export_summary))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_access_key));

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .with_state(state)
}
