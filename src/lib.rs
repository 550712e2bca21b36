// Re-export public API
pub use doclass_core::*;
pub use doclass_models::*;
