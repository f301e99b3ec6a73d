pub mod health;
pub mod itinerary;
pub mod pages;
pub mod reviews;
