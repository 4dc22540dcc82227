//! Common test utilities and helpers.
//!
//! This module provides shared functionality for all tests, including:
//! - Synthetic page builders for in-memory location tests
//! - Test PDF builders
//! - PDF inspection helpers and assertions

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod pdf_helpers;

pub use assertions::*;
pub use fixtures::*;
pub use pdf_helpers::*;
