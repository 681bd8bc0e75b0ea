//! Google Gemini backend for brief generation.
//!
//! One schema-constrained `generateContent` call per brief. The response is
//! required to be JSON matching the Concept Brief shape; anything else fails
//! the attempt.

use async_trait::async_trait;
use promodeck_core::{
    BriefGenerator, BriefRequest, ConceptBrief, GeneratorConfig, PromodeckError, Result,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument};

/// Gemini-backed brief generator.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: Client,
    config: GeneratorConfig,
    brand_name: String,
    brand_descriptor: String,
}

// Request structures
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
    role: String,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: String,
    response_schema: Value,
}

// Response structures
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    total_token_count: u32,
}

impl GeminiGenerator {
    /// Create a new Gemini generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PromodeckError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            brand_name: "Atojet".to_string(),
            brand_descriptor: "filtered shower head brand".to_string(),
        })
    }

    /// Create a generator with configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(GeneratorConfig::from_env())
    }

    /// Set the brand identity woven into the prompt.
    pub fn with_brand(
        mut self,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        self.brand_name = name.into();
        self.brand_descriptor = descriptor.into();
        self
    }

    /// The per-request key wins; otherwise the configured default.
    /// Checked before any network I/O.
    fn resolve_api_key(&self, request: &BriefRequest) -> Result<String> {
        if let Some(key) = request.api_key_override() {
            return Ok(key.to_string());
        }
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or(PromodeckError::MissingApiKey)
    }

    /// Compose the creative-director instruction for one request.
    fn build_prompt(&self, request: &BriefRequest) -> String {
        format!(
            "You are the head designer and creative director of '{brand}', a {descriptor}.\n\
             You are writing the working brief that tells your design team how to build a\n\
             promotional web page or banner for the campaign below.\n\n\
             [Input]\n\
             - Promotion period/season: {period}\n\
             - Product features to highlight: {features}\n\
             - Creativity level: {creativity}/10 (higher means bolder, more unconventional\n\
             concepts; lower means intuitive, safe concepts)\n\n\
             [Request]\n\
             Respond in the required JSON shape with concrete, visual instructions the\n\
             designers can act on immediately.",
            brand = self.brand_name,
            descriptor = self.brand_descriptor,
            period = request.period,
            features = request.features,
            creativity = request.creativity,
        )
    }
}

/// The output schema the service is constrained to: every Concept Brief
/// field, with per-field descriptions for the model.
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "promotionName": {
                "type": "STRING",
                "description": "Catchy title for the promotion"
            },
            "conceptSummary": {
                "type": "STRING",
                "description": "Overall design concept and mood (e.g. clean and refreshing, upscale hotel spa)"
            },
            "layout": {
                "type": "ARRAY",
                "description": "Section-by-section layout of the web page or banner",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "sectionName": {
                            "type": "STRING",
                            "description": "Section label (e.g. Hero, Feature 1, Reviews)"
                        },
                        "visualDescription": {
                            "type": "STRING",
                            "description": "Visual elements and arrangement the designer should draw"
                        },
                        "copy": {
                            "type": "STRING",
                            "description": "Copy that goes inside this section"
                        }
                    },
                    "required": ["sectionName", "visualDescription", "copy"]
                }
            },
            "copywriting": {
                "type": "OBJECT",
                "properties": {
                    "mainCopy": {
                        "type": "STRING",
                        "description": "The headline copy, displayed largest"
                    },
                    "subCopy": {
                        "type": "STRING",
                        "description": "Supporting copy under the headline"
                    },
                    "keywords": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "3-5 reference keywords for the design"
                    }
                },
                "required": ["mainCopy", "subCopy", "keywords"]
            },
            "directorNotes": {
                "type": "STRING",
                "description": "Special instructions or cautions from the director, professional and clear in tone"
            }
        },
        "required": ["promotionName", "conceptSummary", "layout", "copywriting", "directorNotes"]
    })
}

#[async_trait]
impl BriefGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn generate(&self, request: &BriefRequest) -> Result<ConceptBrief> {
        let api_key = self.resolve_api_key(request)?;

        debug!(
            "generating concept brief for period '{}' at temperature {}",
            request.period,
            request.temperature()
        );

        let body = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: self.build_prompt(request),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature(),
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.config.base_url, self.config.model, api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PromodeckError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PromodeckError::ProviderError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| PromodeckError::ProviderError(e.to_string()))?;

        if let Some(usage) = &payload.usage_metadata {
            debug!("generation used {} tokens", usage.total_token_count);
        }

        let text = payload
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| {
                PromodeckError::ProviderError("no content generated".to_string())
            })?;

        ConceptBrief::from_json(&text)
    }
}
