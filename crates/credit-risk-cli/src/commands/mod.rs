pub mod model_metrics;
pub mod roi;
pub mod scoring;
