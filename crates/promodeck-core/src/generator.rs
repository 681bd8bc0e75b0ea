//! The generation seam between the studio and AI backends.
//!
//! Defines the interface that brief generation backends must implement.

use crate::{BriefRequest, ConceptBrief, PromodeckError, Result};
use async_trait::async_trait;

/// Trait that brief generation backends must implement.
#[async_trait]
pub trait BriefGenerator: Send + Sync {
    /// Get the backend name, for logs.
    fn name(&self) -> &str;

    /// Produce a concept brief for one validated request.
    ///
    /// Implementations make at most one outbound call per invocation.
    /// There are no retries at any layer.
    async fn generate(&self, request: &BriefRequest) -> Result<ConceptBrief>;
}

/// A canned generator for tests.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    /// Brief to return. `None` makes every call fail.
    pub brief: Option<ConceptBrief>,
}

impl MockGenerator {
    /// Create a mock that fails every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that returns the given brief on every call.
    pub fn with_brief(brief: ConceptBrief) -> Self {
        Self { brief: Some(brief) }
    }

    /// Create a mock that fails every call.
    pub fn failing() -> Self {
        Self { brief: None }
    }
}

#[async_trait]
impl BriefGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, _request: &BriefRequest) -> Result<ConceptBrief> {
        self.brief.clone().ok_or_else(|| {
            PromodeckError::ProviderError("mock generator configured to fail".to_string())
        })
    }
}
