use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::db::review_store::{ReviewStore, StoreError};
use crate::models::{
    insights::Insights,
    itinerary::{ItineraryOptions, ItineraryRequest, ANY, MAX_TRIP_DAYS, MIN_TRIP_DAYS},
    review::ReviewFilter,
};
use crate::services::{dataset_cache::Datasets, insights::compute_insights};

const APP_TITLE: &str = "TravelPulse Sri Lanka";
const TAGLINE: &str =
    "Discover destinations through data-driven insights and plan your journey smartly.";
const ABOUT: &str = "TravelPulse Sri Lanka is a data-driven platform helping travelers explore \
                     urban and rural destinations using tourist review sentiment analysis.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Explore,
    Itinerary,
    About,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Explore, Page::Itinerary, Page::About];
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Home => "home",
            Page::Explore => "explore",
            Page::Itinerary => "itinerary",
            Page::About => "about",
        };
        f.write_str(name)
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown page '{}'", s))
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum PageView {
    Home {
        title: String,
        tagline: String,
        warnings: Vec<String>,
    },
    Explore {
        available: bool,
        filter: ReviewFilter,
        districts: Vec<String>,
        insights: Option<Insights>,
        notice: Option<String>,
    },
    Itinerary {
        available: bool,
        options: Option<ItineraryOptions>,
        warnings: Vec<String>,
    },
    About {
        title: String,
        body: String,
    },
}

/// Sorted distinct values with the "Any" wildcard first.
fn with_any<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = values.filter(|v| !v.is_empty()).collect();
    std::iter::once(ANY.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

/// Choices for the itinerary form, or `None` when either table is empty.
pub fn itinerary_options(datasets: &Datasets) -> Option<ItineraryOptions> {
    if !datasets.itinerary_available() {
        return None;
    }
    Some(ItineraryOptions {
        districts: with_any(datasets.reviews.rows.iter().map(|r| r.district.as_str())),
        activity_categories: with_any(
            datasets.activities.rows.iter().map(|a| a.category.as_str()),
        ),
        min_days: MIN_TRIP_DAYS,
        max_days: MAX_TRIP_DAYS,
        defaults: ItineraryRequest::default(),
    })
}

/// Builds the view for `page`. The page is chosen per request; nothing is kept between calls.
pub fn render_page(
    page: Page,
    datasets: &Datasets,
    store: &ReviewStore,
    filter: &ReviewFilter,
) -> Result<PageView, StoreError> {
    let view = match page {
        Page::Home => PageView::Home {
            title: APP_TITLE.to_string(),
            tagline: TAGLINE.to_string(),
            warnings: datasets.warnings(),
        },
        Page::Explore => {
            let districts = store.districts()?;
            if store.count()? == 0 {
                PageView::Explore {
                    available: false,
                    filter: filter.clone(),
                    districts,
                    insights: None,
                    notice: Some("No review data available.".to_string()),
                }
            } else {
                let insights = compute_insights(store, filter)?;
                let notice = (!insights.has_geolocation)
                    .then(|| "No geolocation data available.".to_string());
                PageView::Explore {
                    available: true,
                    filter: filter.clone(),
                    districts,
                    insights: Some(insights),
                    notice,
                }
            }
        }
        Page::Itinerary => {
            let options = itinerary_options(datasets);
            PageView::Itinerary {
                available: options.is_some(),
                options,
                warnings: datasets.warnings(),
            }
        }
        Page::About => PageView::About {
            title: format!("About {}", APP_TITLE),
            body: ABOUT.to_string(),
        },
    };
    Ok(view)
}
