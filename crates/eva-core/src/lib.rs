//! Core types and utilities for the Eva compiler.
//!
//! This crate provides the error type, result alias, and source span
//! tracking shared by all compiler stages.

pub mod error;
pub mod span;

pub use error::{Error, Result};
pub use span::Span;
