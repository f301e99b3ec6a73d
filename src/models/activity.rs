use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Activity {
    pub district: String,
    pub category: String,
    pub activity: String,
}

impl Activity {
    /// Label used in rendered itineraries, e.g. "Adventure - White Water Rafting".
    pub fn label(&self) -> String {
        format!("{} - {}", self.category, self.activity)
    }
}
