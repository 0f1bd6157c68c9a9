// Headless CSV runner and exit statuses
pub mod batch;

// Model loading and inference
pub mod ml;

// Input collection boundary shared by the shells
pub mod prediction_form;
