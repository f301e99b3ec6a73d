use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::services::loader::title_case;

/// Districts treated as urban when aggregating reviews. Everything else is rural.
pub const URBAN_DISTRICTS: [&str; 7] = [
    "Colombo",
    "Kandy",
    "Galle",
    "Jaffna",
    "Negombo",
    "Matara",
    "Kurunegala",
];

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSentiment(pub String);

impl fmt::Display for UnknownSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sentiment '{}'", self.0)
    }
}

impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    /// Accepts only the canonical labels. Callers normalize casing first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Positive" => Ok(Sentiment::Positive),
            "Neutral" => Ok(Sentiment::Neutral),
            "Negative" => Ok(Sentiment::Negative),
            other => Err(UnknownSentiment(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AreaType {
    Urban,
    Rural,
}

impl AreaType {
    pub fn for_district(district: &str) -> Self {
        if URBAN_DISTRICTS.contains(&district) {
            AreaType::Urban
        } else {
            AreaType::Rural
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Review {
    pub destination: String,
    pub district: String,
    pub sentiment: Sentiment,
    pub cleaned_review: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Review {
    pub fn area_type(&self) -> AreaType {
        AreaType::for_district(&self.district)
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Optional narrowing applied to review queries. Sentiment wins when both are set.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ReviewFilter {
    pub sentiment: Option<Sentiment>,
    pub district: Option<String>,
}

/// `?sentiment=&district=` exactly as it arrives on the query string.
#[derive(Debug, Deserialize, Default)]
pub struct ReviewQuery {
    pub sentiment: Option<String>,
    pub district: Option<String>,
}

fn normalized(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(title_case)
}

impl ReviewQuery {
    /// Blank values mean no filter. Others are title-cased to match the stored labels.
    pub fn into_filter(self) -> Result<ReviewFilter, UnknownSentiment> {
        let sentiment = normalized(self.sentiment.as_deref())
            .map(|s| s.parse::<Sentiment>())
            .transpose()?;
        Ok(ReviewFilter {
            sentiment,
            district: normalized(self.district.as_deref()),
        })
    }
}
