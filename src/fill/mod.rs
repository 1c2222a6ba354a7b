pub mod classifier;
pub mod detector;
pub mod field_model;
pub mod generator;
pub mod locale;
pub mod orchestrator;
