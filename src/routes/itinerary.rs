use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse, Responder,
};
use chrono::Utc;
use log::error;

use crate::models::itinerary::{ItineraryPlan, ItineraryRequest, ItineraryResponse};
use crate::pages::itinerary_options;
use crate::services::{
    itinerary_builder::{ItineraryBuilder, ItineraryError},
    report_renderer::{render_pdf, render_text, PDF_FILE_NAME},
};
use crate::state::AppState;

const UNAVAILABLE: &str = "Itinerary generation needs both the review and activity datasets.";

fn build_plan(state: &AppState, request: &ItineraryRequest) -> Result<ItineraryPlan, HttpResponse> {
    let datasets = &state.datasets;
    if !datasets.itinerary_available() {
        return Err(HttpResponse::ServiceUnavailable().body(UNAVAILABLE));
    }

    ItineraryBuilder::new(&datasets.reviews.rows, &datasets.activities.rows)
        .build(request)
        .map_err(|err| match err {
            ItineraryError::InvalidTripLength(_) => {
                HttpResponse::BadRequest().body(err.to_string())
            }
            ItineraryError::Pattern(_) => {
                error!("Failed to build itinerary: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to build itinerary.")
            }
        })
}

/*
    /api/itinerary/options
*/
pub async fn get_options(state: web::Data<AppState>) -> impl Responder {
    match itinerary_options(&state.datasets) {
        Some(options) => HttpResponse::Ok().json(options),
        None => HttpResponse::ServiceUnavailable().body(UNAVAILABLE),
    }
}

/*
    /api/itinerary
*/
pub async fn generate(
    state: web::Data<AppState>,
    input: web::Json<ItineraryRequest>,
) -> impl Responder {
    let plan = match build_plan(&state, &input) {
        Ok(plan) => plan,
        Err(resp) => return resp,
    };

    let text = render_text(&plan);
    HttpResponse::Ok().json(ItineraryResponse {
        plan,
        text,
        generated_at: Utc::now(),
    })
}

/*
    /api/itinerary/pdf
*/
pub async fn generate_pdf(
    state: web::Data<AppState>,
    input: web::Json<ItineraryRequest>,
) -> impl Responder {
    let plan = match build_plan(&state, &input) {
        Ok(plan) => plan,
        Err(resp) => return resp,
    };

    match render_pdf(&plan) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(PDF_FILE_NAME.to_string())],
            })
            .body(bytes),
        Err(err) => {
            error!("Failed to render itinerary PDF: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to render itinerary PDF.")
        }
    }
}
