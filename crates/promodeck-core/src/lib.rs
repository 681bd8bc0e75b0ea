//! # Promodeck Core
//!
//! Core library for the Promodeck concept brief studio.
//!
//! This crate provides the pieces shared by every surface:
//!
//! - The Concept Brief data model and its required-field validation
//! - Validated brief requests and the creativity-to-temperature mapping
//! - The `BriefGenerator` trait implemented by AI backends
//! - The presentation session state machine
//! - The plain-text export behind the copy action
//!
//! ## Example
//!
//! ```rust,ignore
//! use promodeck_core::{BriefGenerator, BriefRequest, Session};
//!
//! let request = BriefRequest::new("summer vacation season", "fine bubbles", 7)?;
//! let brief = generator.generate(&request).await?;
//! session.complete(brief);
//! ```

pub mod brief;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod request;
pub mod session;

pub use brief::{ConceptBrief, Copywriting, LayoutSection};
pub use config::{GeneratorConfig, StudioConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{PromodeckError, Result};
pub use export::BriefExporter;
pub use generator::{BriefGenerator, MockGenerator};
pub use request::{creativity_temperature, BriefRequest, CREATIVITY_MAX, CREATIVITY_MIN};
pub use session::{Phase, Session};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        BriefExporter, BriefGenerator, BriefRequest, ConceptBrief, GeneratorConfig, Phase,
        PromodeckError, Result, Session, StudioConfig,
    };
}
