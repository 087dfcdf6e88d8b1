//! Error types and error handling for the front end.
//!
//! This module defines the error types used throughout the pipeline.
//! It includes:
//!
//! - Error structures carrying the source location they refer to
//! - One variant per lexical, syntactic, scope and typing failure
//! - The diagnostics list accumulated by the parser during recovery
//! - Human readable tips for the most common mistakes

pub mod errors;
