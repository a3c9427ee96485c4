use utoipa::OpenApi;
use crate::controllers::analysis_controller;
use crate::models::{analysis, climate, greenhouse};

#[derive(OpenApi)]
#[openapi(
    paths(
        analysis_controller::health,
        analysis_controller::list_regions,
        analysis_controller::list_insulation_grades,
        analysis_controller::compute_geometry,
        analysis_controller::run_analysis,
        analysis_controller::export_daily,
        analysis_controller::export_summary
    ),
    components(
        schemas(
            greenhouse::GreenhouseSpec,
            greenhouse::SurfaceAreaResult,
            climate::ClimateObservation,
            climate::RegionProfile,
            climate::InsulationGrade,
            analysis::AnalysisRequest,
            analysis::AnalysisReport,
            analysis::DailyResult,
            analysis::PeriodSummary
        )
    ),
    tags(
        (name = "figbiz", description = "Fig greenhouse heating cost and profit analysis API")
    )
)]
pub struct ApiDoc;
