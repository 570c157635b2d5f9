//! Movie review sentiment proxy.
//!
//! Accepts single or bulk review text over HTTP, classifies each review with
//! the Gemini `generateContent` API and aggregates the labels for a dashboard.

pub mod aggregate;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod logging;
pub mod sentiment;

pub use aggregate::{BulkReport, Distribution, analyze_bulk};
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use gemini::{Classifier, GeminiClient, GeminiError};
pub use sentiment::Sentiment;
