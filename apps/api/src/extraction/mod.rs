//! Document-to-structured-data extraction pipeline.
//!
//! Control flow: detect → (pdf | word) → sanitize → fields. Each stage is a
//! pure function over its input; the handler wires them to the upload route.

pub mod detect;
pub mod fields;
pub mod handlers;
pub mod pdf;
pub mod sanitize;
pub mod word;
