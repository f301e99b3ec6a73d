use actix_web::web;

pub mod config;
pub mod db;
pub mod models;
pub mod pages;
pub mod routes;
pub mod services;
pub mod state;

/// Route table shared by the server binary and the integration tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api")
                .route("/pages/{page}", web::get().to(routes::pages::get_page))
                .route("/reviews", web::get().to(routes::reviews::get_reviews))
                .route("/insights", web::get().to(routes::reviews::get_insights))
                .service(
                    web::scope("/itinerary")
                        .route("", web::post().to(routes::itinerary::generate))
                        .route("/options", web::get().to(routes::itinerary::get_options))
                        .route("/pdf", web::post().to(routes::itinerary::generate_pdf)),
                ),
        );
}
