mod common;

use actix_web::test;

use common::{TestApp, REVIEWS_CSV};

#[actix_rt::test]
async fn test_health_check_ok_with_both_datasets() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["reviews"], 6);
    assert_eq!(body["activities"], 4);
    assert_eq!(body["itinerary_available"], true);
    assert!(body["warnings"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_health_check_degraded_when_file_missing() {
    let test_app = TestApp::with_files(Some(REVIEWS_CSV), None);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "degraded");
    assert_eq!(body["activities"], 0);
    assert_eq!(body["itinerary_available"], false);
    let warning = body["warnings"][0].as_str().unwrap();
    assert!(warning.contains("Rural_Activities_Expanded.csv not found"));
}

#[actix_rt::test]
async fn test_reviews_drop_unknown_sentiment() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/reviews").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let reviews = body.as_array().unwrap();
    assert_eq!(reviews.len(), 6);
    assert!(reviews
        .iter()
        .all(|r| ["Positive", "Neutral", "Negative"].contains(&r["sentiment"].as_str().unwrap())));
    assert!(reviews.iter().all(|r| r["destination"] != "Sigiriya"));
    assert_eq!(reviews[1]["destination"], "Ella Rock");
    assert_eq!(reviews[1]["district"], "Badulla");
}

#[actix_rt::test]
async fn test_reviews_filtered_by_sentiment() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/reviews?sentiment=Negative")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let reviews = body.as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["destination"], "Unawatuna Beach");
    assert!(reviews[0]["latitude"].is_null());
}

#[actix_rt::test]
async fn test_reviews_filter_normalizes_lowercase_values() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/reviews?sentiment=positive")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    let reviews = body.as_array().unwrap();
    assert_eq!(reviews.len(), 4);
    assert!(reviews.iter().all(|r| r["sentiment"] == "Positive"));

    let req = test::TestRequest::get()
        .uri("/api/reviews?district=badulla")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let reviews = body.as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews.iter().all(|r| r["district"] == "Badulla"));
}

#[actix_rt::test]
async fn test_reviews_reject_unknown_sentiment() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/reviews?sentiment=mixed")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_insights_blank_sentiment_falls_back_to_district() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/insights?sentiment=&district=Badulla")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let distribution = body["area_distribution"].as_array().unwrap();
    assert_eq!(distribution.len(), 1);
    assert_eq!(distribution[0]["area_type"], "Rural");
    assert_eq!(distribution[0]["review_count"], 2);
}

#[actix_rt::test]
async fn test_insights_for_positive_reviews() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/insights?sentiment=Positive")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["totals"]["total_reviews"], 6);
    assert_eq!(body["totals"]["unique_destinations"], 5);
    assert_eq!(body["totals"]["districts_covered"], 5);

    let top = body["top_positive_rural"].as_array().unwrap();
    assert_eq!(top[0]["destination"], "Ella Rock");
    assert_eq!(top[0]["positive_reviews"], 2);
    assert_eq!(top[1]["destination"], "Knuckles Range");

    // Knuckles Range has an unparsable latitude
    assert_eq!(body["map_points"].as_array().unwrap().len(), 3);
    assert_eq!(body["has_geolocation"], true);
}

#[actix_rt::test]
async fn test_insights_unavailable_without_reviews() {
    let test_app = TestApp::with_files(None, None);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/insights").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);
}

#[actix_rt::test]
async fn test_home_page_lists_warnings() {
    let test_app = TestApp::with_files(None, None);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/pages/home").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["page"], "home");
    assert_eq!(body["title"], "TravelPulse Sri Lanka");
    assert_eq!(body["warnings"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_explore_page_with_district_filter() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/pages/Explore?district=Badulla")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["page"], "explore");
    assert_eq!(body["available"], true);
    let distribution = body["insights"]["area_distribution"].as_array().unwrap();
    assert_eq!(distribution.len(), 1);
    assert_eq!(distribution[0]["area_type"], "Rural");
    assert_eq!(distribution[0]["review_count"], 2);
}

#[actix_rt::test]
async fn test_explore_page_lists_districts_without_activities() {
    let test_app = TestApp::with_files(Some(REVIEWS_CSV), None);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/pages/explore").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["available"], true);
    assert_eq!(
        body["districts"],
        serde_json::json!(["Badulla", "Colombo", "Galle", "Kandy", "Matale"])
    );
}

#[actix_rt::test]
async fn test_explore_page_without_reviews() {
    let test_app = TestApp::with_files(None, None);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/pages/explore").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["available"], false);
    assert!(body["insights"].is_null());
    assert!(body["districts"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_unknown_page_is_not_found() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/pages/admin").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
