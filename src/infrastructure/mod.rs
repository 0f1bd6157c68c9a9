pub mod artifact_store;
pub mod telemetry;
