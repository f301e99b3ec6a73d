use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    reviews: usize,
    activities: usize,
    itinerary_available: bool,
    warnings: Vec<String>,
    version: String,
}

/*
    /health
*/
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let datasets = &state.datasets;
    let warnings = datasets.warnings();

    // Any load warning means part of the app is running on an empty table
    let status = if warnings.is_empty() { "ok" } else { "degraded" };

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        reviews: datasets.reviews.rows.len(),
        activities: datasets.activities.rows.len(),
        itinerary_available: datasets.itinerary_available(),
        warnings,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
