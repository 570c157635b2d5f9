pub mod client;
pub mod error;
pub mod types;

pub use client::{Classifier, GeminiClient, build_prompt, extract_label};
pub use error::{FailureKind, GeminiError};
pub use types::{GenerateContentRequest, GenerateContentResponse};
