use std::collections::{BTreeMap, HashMap, HashSet};

use crate::db::review_store::{ReviewStore, StoreError};
use crate::models::insights::{
    AreaCount, DestinationCount, Insights, MapPoint, ReviewTotals, SentimentComparison,
};
use crate::models::review::{AreaType, Review, ReviewFilter, Sentiment};

const TOP_RURAL_LIMIT: usize = 10;

/// Explore-page aggregates. Totals cover every review; the rest covers the filtered view.
pub fn compute_insights(store: &ReviewStore, filter: &ReviewFilter) -> Result<Insights, StoreError> {
    let all = store.query(&ReviewFilter::default())?;
    let filtered = if *filter == ReviewFilter::default() {
        all.clone()
    } else {
        store.query(filter)?
    };

    let map_points = map_points(&filtered);
    Ok(Insights {
        totals: totals(&all),
        area_distribution: area_distribution(&filtered),
        top_positive_rural: top_positive_rural(&filtered, TOP_RURAL_LIMIT),
        has_geolocation: !map_points.is_empty(),
        map_points,
        urban_vs_rural: urban_vs_rural(&filtered),
    })
}

pub fn totals(reviews: &[Review]) -> ReviewTotals {
    let destinations: HashSet<&str> = reviews.iter().map(|r| r.destination.as_str()).collect();
    let districts: HashSet<&str> = reviews.iter().map(|r| r.district.as_str()).collect();
    ReviewTotals {
        total_reviews: reviews.len(),
        unique_destinations: destinations.len(),
        districts_covered: districts.len(),
    }
}

pub fn area_distribution(reviews: &[Review]) -> Vec<AreaCount> {
    let mut counts: BTreeMap<AreaType, usize> = BTreeMap::new();
    for review in reviews {
        *counts.entry(review.area_type()).or_default() += 1;
    }
    let mut distribution: Vec<AreaCount> = counts
        .into_iter()
        .map(|(area_type, review_count)| AreaCount {
            area_type,
            review_count,
        })
        .collect();
    distribution.sort_by(|a, b| b.review_count.cmp(&a.review_count));
    distribution
}

pub fn top_positive_rural(reviews: &[Review], limit: usize) -> Vec<DestinationCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for review in reviews
        .iter()
        .filter(|r| r.area_type() == AreaType::Rural && r.sentiment == Sentiment::Positive)
    {
        *counts.entry(review.destination.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(destination, positive_reviews)| DestinationCount {
            destination: destination.to_string(),
            positive_reviews,
        })
        .collect()
}

pub fn map_points(reviews: &[Review]) -> Vec<MapPoint> {
    reviews
        .iter()
        .filter_map(|r| {
            let (latitude, longitude) = r.coordinates()?;
            Some(MapPoint {
                destination: r.destination.clone(),
                district: r.district.clone(),
                sentiment: r.sentiment,
                cleaned_review: r.cleaned_review.clone(),
                latitude,
                longitude,
            })
        })
        .collect()
}

pub fn urban_vs_rural(reviews: &[Review]) -> Vec<SentimentComparison> {
    let mut counts: BTreeMap<(AreaType, Sentiment), usize> = BTreeMap::new();
    for review in reviews {
        *counts
            .entry((review.area_type(), review.sentiment))
            .or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((area_type, sentiment), count)| SentimentComparison {
            area_type,
            sentiment,
            count,
        })
        .collect()
}
