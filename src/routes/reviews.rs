use actix_web::{web, HttpResponse, Responder};
use log::error;

use crate::models::review::ReviewQuery;
use crate::services::insights::compute_insights;
use crate::state::AppState;

/*
    /api/reviews?sentiment=&district=
*/
pub async fn get_reviews(
    query: web::Query<ReviewQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let filter = match query.into_inner().into_filter() {
        Ok(filter) => filter,
        Err(err) => return HttpResponse::BadRequest().body(err.to_string()),
    };

    let store = match state.store() {
        Ok(store) => store,
        Err(err) => {
            error!("{}", err);
            return HttpResponse::InternalServerError().body("Failed to read reviews.");
        }
    };

    match store.query(&filter) {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => {
            error!("Failed to query reviews: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to query reviews.")
        }
    }
}

/*
    /api/insights?sentiment=&district=
*/
pub async fn get_insights(
    query: web::Query<ReviewQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    if state.datasets.reviews.is_empty() {
        return HttpResponse::ServiceUnavailable().body("No review data available.");
    }
    let filter = match query.into_inner().into_filter() {
        Ok(filter) => filter,
        Err(err) => return HttpResponse::BadRequest().body(err.to_string()),
    };

    let store = match state.store() {
        Ok(store) => store,
        Err(err) => {
            error!("{}", err);
            return HttpResponse::InternalServerError().body("Failed to read reviews.");
        }
    };

    match compute_insights(&store, &filter) {
        Ok(insights) => HttpResponse::Ok().json(insights),
        Err(err) => {
            error!("Failed to compute insights: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to compute insights.")
        }
    }
}
