pub mod feature_registry;
pub mod model_artifact;
pub mod pipeline;
