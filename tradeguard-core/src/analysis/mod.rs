//! Strategy image analysis: an independent collaborator of the engine.
//!
//! Sends a screenshot of a trading-rule table to a multimodal model and
//! returns its free-form reading. Nothing here feeds back into the tier
//! engine; the result is text for a human.

pub mod gemini;
pub mod image;

pub use gemini::GeminiAnalyzer;
pub use image::ImageInput;

use thiserror::Error;

/// Prompt sent along with the image.
pub const ANALYSIS_PROMPT: &str = "Please analyze this trading strategy image.\n\
    1. Identify the \"profit state\" rules (for example, profit < 5%).\n\
    2. Identify the corresponding \"strategy\" or \"stop-loss\" actions.\n\
    3. Summarize the logic in plain language for a trader.\n\
    Format the output as a clear list.";

/// Returned when the model answers with no text.
pub const EMPTY_ANALYSIS: &str = "Unable to generate analysis.";

/// Errors surfaced to the user as plain messages. None are retried.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("an API key is required for image analysis")]
    MissingApiKey,

    #[error("read image {path}: {message}")]
    ImageRead { path: String, message: String },

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("analysis failed (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response format: {0}")]
    ResponseFormat(String),
}

/// A service that reads a strategy image and describes it.
pub trait ImageAnalyzer: Send + Sync {
    /// Human-readable name of the backing service.
    fn name(&self) -> &str;

    /// Analyze one image. Fails with [`AnalysisError::MissingApiKey`] before
    /// any I/O if `api_key` is blank.
    fn analyze(&self, image: &ImageInput, api_key: &str) -> Result<String, AnalysisError>;
}
