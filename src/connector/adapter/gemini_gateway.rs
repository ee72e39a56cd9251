use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::application::ModelGateway;
use crate::domain::{DomainError, GenerationRequest, OutputSchema, Part};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const API_VERSION_PATH: &str = "/v1beta/models";
const JSON_MIME: &str = "application/json";

/// Connection settings for [`GeminiGateway`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    /// Read configuration from the environment once, at startup:
    ///
    /// | Variable              | Default                                     |
    /// |-----------------------|---------------------------------------------|
    /// | `GEMINI_API_KEY`      | falls back to `API_KEY`, else empty         |
    /// | `GEMINI_MODEL`        | `gemini-3-pro-preview`                      |
    /// | `GEMINI_BASE_URL`     | `https://generativelanguage.googleapis.com` |
    /// | `GEMINI_TIMEOUT_SECS` | `60`                                        |
    ///
    /// A missing key is not an error here; every call will fail instead.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .unwrap_or_default();
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = parse_timeout_secs(std::env::var("GEMINI_TIMEOUT_SECS").ok().as_deref());
        Self {
            api_key,
            model,
            base_url,
            timeout: Duration::from_secs(timeout),
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    contents: Vec<ApiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ApiSystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<ApiGenerationConfig>,
}

#[derive(Serialize)]
struct ApiContent {
    role: &'static str,
    parts: Vec<ApiPart>,
}

#[derive(Serialize)]
struct ApiSystemInstruction {
    parts: Vec<ApiPart>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ApiPart {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: ApiBlob,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiBlob {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Seconds for one call; unset, unparsable or zero values fall back to the
/// default.
fn parse_timeout_secs(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}

/// HTTP client for the Gemini `generateContent` endpoint.
///
/// Implements [`ModelGateway`] so the adapters never see the vendor wire
/// format. The API key is read once at construction; when it is empty the
/// gateway still builds, and every call fails with a transport error
/// without touching the network.
pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Base URL with trailing slashes removed.
    base_url: String,
}

impl GeminiGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            api_key: config.api_key,
            model: config.model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(GatewayConfig::from_env())
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}{API_VERSION_PATH}/{model}:generateContent", self.base_url)
    }

    fn to_api_request(request: &GenerationRequest) -> ApiRequest {
        let contents = request
            .contents
            .iter()
            .map(|c| ApiContent {
                role: c.role.as_str(),
                parts: c.parts.iter().map(Self::to_api_part).collect(),
            })
            .collect();

        let system_instruction = request
            .system_instruction
            .as_ref()
            .map(|text| ApiSystemInstruction {
                parts: vec![ApiPart::Text { text: text.clone() }],
            });

        let generation_config = request
            .output_schema
            .as_ref()
            .map(|schema| ApiGenerationConfig {
                response_mime_type: JSON_MIME,
                response_schema: schema_to_value(schema),
            });

        ApiRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    fn to_api_part(part: &Part) -> ApiPart {
        match part {
            Part::Text(text) => ApiPart::Text { text: text.clone() },
            Part::InlineData { mime_type, data } => ApiPart::InlineData {
                inline_data: ApiBlob {
                    mime_type: mime_type.clone(),
                    data: STANDARD.encode(data),
                },
            },
        }
    }

    /// Concatenated text of the first candidate, if any.
    fn extract_text(response: ApiResponse) -> Option<String> {
        let text: String = response
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Translate a vendor-neutral schema into Gemini's OpenAPI-style dialect.
fn schema_to_value(schema: &OutputSchema) -> Value {
    let mut out = Map::new();
    let kind = match schema {
        OutputSchema::Object {
            properties,
            required,
            ..
        } => {
            let props: Map<String, Value> = properties
                .iter()
                .map(|p| (p.name.clone(), schema_to_value(&p.schema)))
                .collect();
            out.insert("properties".to_string(), Value::Object(props));
            if !required.is_empty() {
                out.insert("required".to_string(), json!(required));
            }
            "OBJECT"
        }
        OutputSchema::Array { items, .. } => {
            out.insert("items".to_string(), schema_to_value(items));
            "ARRAY"
        }
        OutputSchema::String { .. } => "STRING",
        OutputSchema::Number { .. } => "NUMBER",
    };
    out.insert("type".to_string(), json!(kind));
    if let Some(description) = schema.description() {
        out.insert("description".to_string(), json!(description));
    }
    Value::Object(out)
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn complete(&self, request: GenerationRequest) -> Result<String, DomainError> {
        if self.api_key.trim().is_empty() {
            return Err(DomainError::transport(
                "GeminiGateway: no API key configured (set GEMINI_API_KEY)",
            ));
        }

        let url = self.endpoint(&request.model);
        let body = Self::to_api_request(&request);
        debug!(
            "GeminiGateway: POST {url} ({} contents, schema: {})",
            body.contents.len(),
            body.generation_config.is_some()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("GeminiGateway: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiGateway: API returned {status}: {body}");
            return Err(DomainError::transport(format!(
                "GeminiGateway: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::transport(format!("GeminiGateway: failed to parse response: {e}"))
        })?;

        Self::extract_text(api_response)
            .ok_or_else(|| DomainError::empty_response("GeminiGateway: response contained no text"))
    }

    fn model(&self) -> &str {
        &self.model
    }
}
