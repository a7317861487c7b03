// Service exports
pub mod reasoner;
pub mod retrieval;

pub use reasoner::{fallback_reason, BackendMode, ReasonError, ReasonGenerator, ReasonerConfig};
pub use retrieval::{RetrievalClient, RetrievalError};
