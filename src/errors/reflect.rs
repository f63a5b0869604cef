// src/errors/reflect.rs
//! Type reflection errors (E5xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum ReflectError {
    #[error("invalid type: {reason}")]
    #[diagnostic(code(E5001))]
    InvalidType { reason: String },

    #[error("missing type parameter: '{found}' is not a parameterized type")]
    #[diagnostic(
        code(E5002),
        help("capture a parameterized type such as List<String>, or build the descriptor explicitly")
    )]
    MissingTypeParameter { found: String },

    #[error("unexpected type shape: expected one of {expected}, but got {actual} for type '{rendered}'")]
    #[diagnostic(code(E5003))]
    UnexpectedTypeShape {
        expected: String,
        actual: String,
        rendered: String,
    },
}

impl ReflectError {
    pub fn invalid_type(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(%reason, "invalid type");
        ReflectError::InvalidType { reason }
    }
}
