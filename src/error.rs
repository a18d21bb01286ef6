use thiserror::Error;

pub type CtaResult<T> = Result<T, CtaError>;

#[derive(Error, Debug, Clone)]
pub enum CtaError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown component type '{tag}'")]
    UnknownComponentType { tag: String },

    #[error("Component '{id}' not found")]
    ComponentNotFound { id: String },

    #[error("Duplicate id '{id}': component ids must be unique within the document")]
    DuplicateId { id: String },

    #[error("Order invariant violated at position {position}: expected {expected}, found {found}")]
    OrderInvariant {
        position: usize,
        expected: u32,
        found: u32,
    },

    #[error("Invalid property path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}
