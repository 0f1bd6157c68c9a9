// Domain-specific error types
pub mod errors;

// Feature schema and model artifact
pub mod ml;
