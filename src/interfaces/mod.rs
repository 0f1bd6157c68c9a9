pub mod components;
pub mod design_system;
pub mod prediction_app;

pub use prediction_app::PredictionApp;
