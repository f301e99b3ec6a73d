use std::collections::{HashMap, HashSet};

use log::info;
use regex::RegexBuilder;
use thiserror::Error;

use crate::models::{
    activity::Activity,
    itinerary::{
        DayPlan, ItineraryEntry, ItineraryPlan, ItineraryRequest, MAX_TRIP_DAYS, MIN_TRIP_DAYS,
    },
    review::Review,
};
use crate::services::loader::title_case;

#[derive(Error, Debug)]
pub enum ItineraryError {
    #[error("Trip length must be between 1 and 10 days, got {0}")]
    InvalidTripLength(u32),

    #[error("Invalid city pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Builds day-by-day plans from the review and activity tables.
pub struct ItineraryBuilder<'a> {
    reviews: &'a [Review],
    activities: &'a [Activity],
}

impl<'a> ItineraryBuilder<'a> {
    pub fn new(reviews: &'a [Review], activities: &'a [Activity]) -> Self {
        Self {
            reviews,
            activities,
        }
    }

    pub fn build(&self, request: &ItineraryRequest) -> Result<ItineraryPlan, ItineraryError> {
        if !(MIN_TRIP_DAYS..=MAX_TRIP_DAYS).contains(&request.num_days) {
            return Err(ItineraryError::InvalidTripLength(request.num_days));
        }

        let district = request.district_filter().map(title_case);
        let categories: Option<Vec<String>> = request
            .category_filter()
            .map(|cats| cats.iter().map(|c| title_case(c.trim())).collect());

        let reviews = filter_by_district(
            dedupe_by_destination(self.reviews),
            district.as_deref(),
        );
        let activities = filter_activities(self.activities, categories.as_deref());

        let mut entries = left_join(reviews, &activities);
        entries = move_matches_to_front(entries, &request.start_city)?;
        entries = move_matches_to_back(entries, &request.end_city)?;

        let plan = bucket_days(entries, request.num_days);
        info!(
            "Built {}-day itinerary: {} entries per day, {} scheduled, {} unassigned",
            plan.num_days,
            plan.entries_per_day,
            plan.total_entries(),
            plan.unassigned_entries
        );
        Ok(plan)
    }
}

/// Keeps the first review seen for each destination.
pub fn dedupe_by_destination(reviews: &[Review]) -> Vec<Review> {
    let mut seen = HashSet::new();
    reviews
        .iter()
        .filter(|r| seen.insert(r.destination.as_str()))
        .cloned()
        .collect()
}

pub fn filter_by_district(reviews: Vec<Review>, district: Option<&str>) -> Vec<Review> {
    match district {
        Some(district) => reviews
            .into_iter()
            .filter(|r| r.district == district)
            .collect(),
        None => reviews,
    }
}

pub fn filter_activities<'a>(
    activities: &'a [Activity],
    categories: Option<&[String]>,
) -> Vec<&'a Activity> {
    match categories {
        Some(categories) => activities
            .iter()
            .filter(|a| categories.iter().any(|c| *c == a.category))
            .collect(),
        None => activities.iter().collect(),
    }
}

/// Left join on district. A review fans out into one entry per matching
/// activity; without a match it appears once with no activity.
pub fn left_join(reviews: Vec<Review>, activities: &[&Activity]) -> Vec<ItineraryEntry> {
    let mut by_district: HashMap<&str, Vec<&Activity>> = HashMap::new();
    for &activity in activities {
        by_district
            .entry(activity.district.as_str())
            .or_default()
            .push(activity);
    }

    let mut entries = Vec::with_capacity(reviews.len());
    for review in reviews {
        match by_district.get(review.district.as_str()) {
            Some(matches) => {
                for activity in matches {
                    entries.push(ItineraryEntry {
                        review: review.clone(),
                        activity: Some((*activity).clone()),
                    });
                }
            }
            None => entries.push(ItineraryEntry {
                review,
                activity: None,
            }),
        }
    }
    entries
}

/// Splits entries on whether their destination contains `city`, ignoring case.
fn partition_by_destination(
    entries: Vec<ItineraryEntry>,
    city: &str,
) -> Result<(Vec<ItineraryEntry>, Vec<ItineraryEntry>), ItineraryError> {
    let matcher = RegexBuilder::new(&regex::escape(city))
        .case_insensitive(true)
        .build()?;
    Ok(entries
        .into_iter()
        .partition(|e| matcher.is_match(&e.review.destination)))
}

/// Moves entries whose destination contains `city` to the front, keeping relative order.
pub fn move_matches_to_front(
    entries: Vec<ItineraryEntry>,
    city: &str,
) -> Result<Vec<ItineraryEntry>, ItineraryError> {
    if city.is_empty() {
        return Ok(entries);
    }
    let (mut matched, rest) = partition_by_destination(entries, city)?;
    matched.extend(rest);
    Ok(matched)
}

/// Moves entries whose destination contains `city` to the back, keeping relative order.
pub fn move_matches_to_back(
    entries: Vec<ItineraryEntry>,
    city: &str,
) -> Result<Vec<ItineraryEntry>, ItineraryError> {
    if city.is_empty() {
        return Ok(entries);
    }
    let (matched, mut rest) = partition_by_destination(entries, city)?;
    rest.extend(matched);
    Ok(rest)
}

/// Splits entries into `num_days` contiguous buckets of `max(1, total / num_days)`.
/// Entries past the last bucket are counted as unassigned, not scheduled.
pub fn bucket_days(entries: Vec<ItineraryEntry>, num_days: u32) -> ItineraryPlan {
    let total = entries.len();
    let entries_per_day = (total / num_days.max(1) as usize).max(1);

    let mut remaining = entries.into_iter();
    let days: Vec<DayPlan> = (1..=num_days)
        .map(|day| DayPlan {
            day,
            entries: remaining.by_ref().take(entries_per_day).collect(),
        })
        .collect();

    ItineraryPlan {
        num_days,
        entries_per_day,
        days,
        unassigned_entries: remaining.count(),
    }
}
