//! # Promodeck Configuration
//!
//! Central configuration for the studio and the generation backend.
//! Supports loading from environment variables and programmatic defaults.

use std::env;

/// Default Gemini model used for brief generation.
pub const DEFAULT_MODEL: &str = "gemini-3.1-pro-preview";

/// Default REST endpoint prefix for the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Connection settings for the generation backend.
///
/// The default credential is resolved once, here, at configuration time.
/// A per-request key always takes precedence over it inside the backend.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Default API key. `None` means only per-request keys can authenticate.
    pub api_key: Option<String>,

    /// Model identifier.
    pub model: String,

    /// Base URL for the API.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 60,
        }
    }
}

impl GeneratorConfig {
    /// Load backend settings from environment variables.
    ///
    /// Reads `GEMINI_API_KEY` (or `PROMODECK_API_KEY`), `PROMODECK_MODEL`,
    /// `PROMODECK_BASE_URL` and `PROMODECK_TIMEOUT`. Missing variables fall
    /// back to defaults; a missing key is allowed because the form can
    /// supply one per call.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = env::var("GEMINI_API_KEY").or_else(|_| env::var("PROMODECK_API_KEY")) {
            if !v.trim().is_empty() {
                config.api_key = Some(v);
            }
        }
        if let Ok(v) = env::var("PROMODECK_MODEL") {
            config.model = v;
        }
        if let Ok(v) = env::var("PROMODECK_BASE_URL") {
            config.base_url = v;
        }
        if let Ok(v) = env::var("PROMODECK_TIMEOUT") {
            if let Ok(n) = v.parse() {
                config.timeout_seconds = n;
            }
        }

        config
    }

    /// Builder: set the default API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Builder: set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder: set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder: set the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Application-level configuration for the studio.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Generation backend settings.
    pub generator: GeneratorConfig,

    /// Port the web UI listens on.
    /// Default: 3000, Env: PROMODECK_PORT
    pub port: u16,

    /// Brand the creative director speaks for.
    /// Default: "Atojet", Env: PROMODECK_BRAND
    pub brand_name: String,

    /// One-line product descriptor woven into the prompt.
    /// Default: "filtered shower head brand", Env: PROMODECK_BRAND_DESCRIPTOR
    pub brand_descriptor: String,

    /// Delay before the copy-confirmation flag resets, in milliseconds.
    /// Default: 2000, Env: PROMODECK_COPY_RESET_MS
    pub copy_reset_ms: u64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            port: 3000,
            brand_name: "Atojet".to_string(),
            brand_descriptor: "filtered shower head brand".to_string(),
            copy_reset_ms: 2000,
        }
    }
}

impl StudioConfig {
    /// Create a new config from environment variables.
    /// Falls back to defaults for missing variables.
    pub fn from_env() -> Self {
        let mut config = Self {
            generator: GeneratorConfig::from_env(),
            ..Self::default()
        };

        if let Ok(v) = env::var("PROMODECK_PORT") {
            if let Ok(n) = v.parse() {
                config.port = n;
            }
        }
        if let Ok(v) = env::var("PROMODECK_BRAND") {
            config.brand_name = v;
        }
        if let Ok(v) = env::var("PROMODECK_BRAND_DESCRIPTOR") {
            config.brand_descriptor = v;
        }
        if let Ok(v) = env::var("PROMODECK_COPY_RESET_MS") {
            if let Ok(n) = v.parse() {
                config.copy_reset_ms = n;
            }
        }

        config
    }

    /// Builder: set the listen port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder: set the brand identity used in prompts.
    pub fn with_brand(
        mut self,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        self.brand_name = name.into();
        self.brand_descriptor = descriptor.into();
        self
    }

    /// Builder: set the copy-confirmation reset delay.
    pub fn with_copy_reset_ms(mut self, ms: u64) -> Self {
        self.copy_reset_ms = ms;
        self
    }

    /// Builder: replace the backend settings.
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StudioConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.copy_reset_ms, 2000);
        assert_eq!(config.generator.model, DEFAULT_MODEL);
        assert_eq!(config.generator.timeout_seconds, 60);
        assert!(config.generator.api_key.is_none());
    }

    #[test]
    fn builder_pattern() {
        let config = StudioConfig::default()
            .with_port(8080)
            .with_brand("Rivulet", "water purifier brand")
            .with_copy_reset_ms(500)
            .with_generator(GeneratorConfig::default().with_model("gemini-test"));

        assert_eq!(config.port, 8080);
        assert_eq!(config.brand_name, "Rivulet");
        assert_eq!(config.copy_reset_ms, 500);
        assert_eq!(config.generator.model, "gemini-test");
    }
}
