use serde::{Deserialize, Serialize};

use crate::models::review::{AreaType, Sentiment};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReviewTotals {
    pub total_reviews: usize,
    pub unique_destinations: usize,
    pub districts_covered: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AreaCount {
    pub area_type: AreaType,
    pub review_count: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DestinationCount {
    pub destination: String,
    pub positive_reviews: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MapPoint {
    pub destination: String,
    pub district: String,
    pub sentiment: Sentiment,
    pub cleaned_review: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SentimentComparison {
    pub area_type: AreaType,
    pub sentiment: Sentiment,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Insights {
    pub totals: ReviewTotals,
    pub area_distribution: Vec<AreaCount>,
    pub top_positive_rural: Vec<DestinationCount>,
    pub map_points: Vec<MapPoint>,
    pub has_geolocation: bool,
    pub urban_vs_rural: Vec<SentimentComparison>,
}
