use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown canonical field: {0}")]
    UnknownField(String),
    #[error("invalid mapping edit '{0}' (expected <field>=<header>)")]
    InvalidMappingEdit(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
