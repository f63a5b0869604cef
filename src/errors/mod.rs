// src/errors/mod.rs
//! Structured error reporting for type reflection.
//!
//! Errors derive miette diagnostics so callers can render them with codes.

pub mod reflect;

pub use reflect::ReflectError;

pub type Result<T, E = ReflectError> = std::result::Result<T, E>;
