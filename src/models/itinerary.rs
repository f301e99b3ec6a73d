use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{activity::Activity, review::Review};

/// Wildcard option offered by the itinerary form for district and category pickers.
pub const ANY: &str = "Any";

pub const MIN_TRIP_DAYS: u32 = 1;
pub const MAX_TRIP_DAYS: u32 = 10;
const DEFAULT_TRIP_DAYS: u32 = 3;
const DEFAULT_START_CITY: &str = "Colombo";
const DEFAULT_END_CITY: &str = "Kandy";

fn default_num_days() -> u32 {
    DEFAULT_TRIP_DAYS
}

fn default_start_city() -> String {
    DEFAULT_START_CITY.to_string()
}

fn default_end_city() -> String {
    DEFAULT_END_CITY.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItineraryRequest {
    #[serde(default = "default_num_days")]
    pub num_days: u32,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub activity_categories: Vec<String>,
    #[serde(default = "default_start_city")]
    pub start_city: String,
    #[serde(default = "default_end_city")]
    pub end_city: String,
}

impl Default for ItineraryRequest {
    fn default() -> Self {
        Self {
            num_days: DEFAULT_TRIP_DAYS,
            district: None,
            activity_categories: Vec::new(),
            start_city: default_start_city(),
            end_city: default_end_city(),
        }
    }
}

impl ItineraryRequest {
    /// District to filter on, or `None` when unset or "Any".
    pub fn district_filter(&self) -> Option<&str> {
        self.district
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty() && !d.eq_ignore_ascii_case(ANY))
    }

    /// Category set to filter on, or `None` when empty or containing "Any".
    pub fn category_filter(&self) -> Option<&[String]> {
        if self.activity_categories.is_empty()
            || self
                .activity_categories
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(ANY))
        {
            None
        } else {
            Some(&self.activity_categories)
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItineraryEntry {
    #[serde(flatten)]
    pub review: Review,
    pub activity: Option<Activity>,
}

impl ItineraryEntry {
    pub fn activity_label(&self) -> String {
        self.activity
            .as_ref()
            .map(Activity::label)
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayPlan {
    pub day: u32,
    pub entries: Vec<ItineraryEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItineraryPlan {
    pub num_days: u32,
    pub entries_per_day: usize,
    pub days: Vec<DayPlan>,
    /// Entries past `num_days * entries_per_day`; they are not scheduled.
    pub unassigned_entries: usize,
}

impl ItineraryPlan {
    pub fn scheduled_days(&self) -> impl Iterator<Item = &DayPlan> {
        self.days.iter().filter(|d| !d.entries.is_empty())
    }

    pub fn total_entries(&self) -> usize {
        self.days.iter().map(|d| d.entries.len()).sum()
    }
}

#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub plan: ItineraryPlan,
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ItineraryOptions {
    pub districts: Vec<String>,
    pub activity_categories: Vec<String>,
    pub min_days: u32,
    pub max_days: u32,
    pub defaults: ItineraryRequest,
}
