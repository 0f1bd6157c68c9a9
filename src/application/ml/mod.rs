pub mod inference_service;
pub mod model_loader;
pub mod predictor;
pub mod smartcore_predictor;

pub use inference_service::InferenceService;
pub use model_loader::ModelLoader;
pub use predictor::PricePredictor;
