#![allow(dead_code)]

use std::fs;

use actix_web::{web, App};
use tempfile::TempDir;

use travelpulse_api::{
    config::{AppConfig, ACTIVITIES_FILE, IN_MEMORY_DB, REVIEWS_FILE},
    configure_routes,
    state::AppState,
};

pub const REVIEWS_CSV: &str = "Cleaned_Review,Sentiment,District,Destination,Latitude,Longitude,Rating
great views of the sea,Positive,Colombo,Colombo Fort,6.93,79.84,5
lovely hike,positive,badulla,ella rock,6.86,81.05,5
busy but calm,Neutral,Kandy,Kandy Lake,7.29,80.64,3
dirty beach,Negative,Galle,Unawatuna Beach,,80.25,1
worth the climb,Positive,Badulla,Ella Rock,6.86,81.05,4
no idea,Unknown,Matale,Sigiriya,7.95,80.76,3
quiet forest,Positive,Matale,Knuckles Range,abc,80.8,5
";

pub const ACTIVITIES_CSV: &str = "Activity Category,Activity,District
Hiking,Little Adam's Peak trek,Badulla
culture,Tea factory tour,Badulla
Culture,Kandyan dance,Kandy
Water Sports,Snorkelling,Galle
";

pub struct TestApp {
    pub state: web::Data<AppState>,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_files(Some(REVIEWS_CSV), Some(ACTIVITIES_CSV))
    }

    /// Writes the given fixtures into a fresh data directory; `None` leaves the file missing.
    pub fn with_files(reviews: Option<&str>, activities: Option<&str>) -> Self {
        let dir = TempDir::new().expect("Failed to create temp data dir");
        if let Some(contents) = reviews {
            fs::write(dir.path().join(REVIEWS_FILE), contents).expect("Failed to write reviews");
        }
        if let Some(contents) = activities {
            fs::write(dir.path().join(ACTIVITIES_FILE), contents)
                .expect("Failed to write activities");
        }

        let mut config = AppConfig::for_data_dir(dir.path());
        config.db_path = IN_MEMORY_DB.to_string();

        let state = AppState::initialize(&config).expect("Failed to initialize app state");

        Self {
            state: web::Data::new(state),
            _dir: dir,
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .configure(configure_routes)
    }
}
