mod predictive_handler;

pub use predictive_handler::*;
