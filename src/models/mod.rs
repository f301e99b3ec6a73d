pub mod activity;
pub mod insights;
pub mod itinerary;
pub mod review;
