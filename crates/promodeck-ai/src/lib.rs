//! # Promodeck AI
//!
//! Generation backends for the Promodeck brief studio.
//!
//! One backend today: Google Gemini over the REST `generateContent`
//! endpoint, constrained to structured JSON output.
//!
//! ## Example
//!
//! ```rust,ignore
//! use promodeck_ai::GeminiGenerator;
//! use promodeck_core::{BriefGenerator, BriefRequest};
//!
//! let generator = GeminiGenerator::from_env()?;
//! let request = BriefRequest::new("summer vacation season", "fine bubbles", 7)?;
//! let brief = generator.generate(&request).await?;
//! ```

pub mod gemini;

pub use gemini::GeminiGenerator;

/// Re-export core types for convenience.
pub use promodeck_core::{BriefGenerator, BriefRequest, ConceptBrief, GeneratorConfig};

/// Create a Gemini generator for a specific model, with the rest of the
/// configuration from the environment.
///
/// # Example
///
/// ```rust,ignore
/// let generator = promodeck_ai::gemini("gemini-3.1-pro-preview")?;
/// ```
pub fn gemini(model: &str) -> promodeck_core::Result<GeminiGenerator> {
    GeminiGenerator::new(GeneratorConfig::from_env().with_model(model))
}
