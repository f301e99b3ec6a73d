use actix_web::{web, HttpResponse, Responder};
use log::error;

use crate::models::review::ReviewQuery;
use crate::pages::{render_page, Page};
use crate::state::AppState;

/*
    /api/pages/{page}
*/
pub async fn get_page(
    path: web::Path<String>,
    query: web::Query<ReviewQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let page: Page = match path.into_inner().parse() {
        Ok(page) => page,
        Err(msg) => return HttpResponse::NotFound().body(msg),
    };
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

    match render_page(page, &state.datasets, &store, &filter) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => {
            error!("Failed to render {} page: {:?}", page, err);
            HttpResponse::InternalServerError().body("Failed to render page.")
        }
    }
}
