pub mod dataset_cache;
pub mod insights;
pub mod itinerary_builder;
pub mod loader;
pub mod report_renderer;
