pub mod aggregation;
mod predictive_service;

pub use predictive_service::PredictiveService;
