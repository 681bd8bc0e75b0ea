//! Brief requests and the creativity-to-temperature mapping.

use crate::{PromodeckError, Result};
use serde::{Deserialize, Serialize};

/// Lowest accepted creativity level.
pub const CREATIVITY_MIN: u8 = 1;

/// Highest accepted creativity level.
pub const CREATIVITY_MAX: u8 = 10;

/// Map a 1-10 creativity level onto a generation temperature.
///
/// The mapping is linear: `creativity / 10 * 1.6 + 0.2`, which yields
/// 0.36 for level 1 up to 1.8 for level 10.
pub fn creativity_temperature(creativity: u8) -> f32 {
    creativity as f32 / 10.0 * 1.6 + 0.2
}

/// Validated input for one brief generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BriefRequest {
    /// Promotion period or season (e.g. "summer vacation season").
    pub period: String,

    /// Product features to highlight, free-form.
    pub features: String,

    /// Creativity level, 1-10.
    pub creativity: u8,

    /// Per-request API key; takes precedence over the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl BriefRequest {
    /// Create a validated request.
    ///
    /// `period` and `features` must be non-empty after trimming and
    /// `creativity` must be within 1-10; violations are `InvalidRequest`
    /// and nothing is ever dispatched for them.
    pub fn new(
        period: impl Into<String>,
        features: impl Into<String>,
        creativity: u8,
    ) -> Result<Self> {
        let period = period.into();
        let features = features.into();

        if period.trim().is_empty() {
            return Err(PromodeckError::InvalidRequest(
                "period must not be empty".to_string(),
            ));
        }
        if features.trim().is_empty() {
            return Err(PromodeckError::InvalidRequest(
                "features must not be empty".to_string(),
            ));
        }
        if !(CREATIVITY_MIN..=CREATIVITY_MAX).contains(&creativity) {
            return Err(PromodeckError::InvalidRequest(format!(
                "creativity must be between {CREATIVITY_MIN} and {CREATIVITY_MAX}, got {creativity}"
            )));
        }

        Ok(Self {
            period,
            features,
            creativity,
            api_key: None,
        })
    }

    /// Attach a per-request API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// The generation temperature for this request.
    pub fn temperature(&self) -> f32 {
        creativity_temperature(self.creativity)
    }

    /// The per-request key, if a non-empty one was supplied.
    pub fn api_key_override(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
