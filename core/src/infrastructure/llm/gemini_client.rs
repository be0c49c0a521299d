use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{
    assessment::{
        entities::GroundingUrl,
        ports::LLMClient,
        value_objects::{ImageInput, LLMResponse},
    },
    common::{DEFAULT_GEMINI_BASE_URL, entities::app_errors::CoreError},
};

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

impl GeminiLLMClient {
    pub fn new(api_key: String, model_name: String) -> Self {
        Self {
            api_key,
            model_name,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn request(parts: Vec<Part>) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content { parts }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        }
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<LLMResponse, CoreError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model_name, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // the request URL carries the API key
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        into_llm_response(gemini_response)
    }
}

fn into_llm_response(response: GeminiResponse) -> Result<LLMResponse, CoreError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))?;

    // Grounded answers may arrive split over several parts
    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    let grounding_urls = candidate
        .grounding_metadata
        .map(|metadata| collect_grounding_urls(metadata.grounding_chunks))
        .unwrap_or_default();

    tracing::debug!(
        chars = text.len(),
        grounding_urls = grounding_urls.len(),
        "Gemini response received"
    );

    Ok(LLMResponse {
        text,
        grounding_urls,
    })
}

/// Keeps web citations with a parsable URI, first occurrence wins.
fn collect_grounding_urls(chunks: Vec<GroundingChunk>) -> Vec<GroundingUrl> {
    let mut urls: Vec<GroundingUrl> = Vec::new();

    for web in chunks.into_iter().filter_map(|chunk| chunk.web) {
        let Some(uri) = web.uri else {
            continue;
        };
        let Ok(parsed) = Url::parse(&uri) else {
            tracing::warn!(uri = %uri, "Dropping grounding citation with invalid URI");
            continue;
        };
        if urls.iter().any(|existing| existing.uri == uri) {
            continue;
        }

        let title = web
            .title
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .or_else(|| parsed.host_str().map(str::to_string))
            .unwrap_or_else(|| uri.clone());

        urls.push(GroundingUrl { uri, title });
    }

    urls
}

impl LLMClient for GeminiLLMClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        image: ImageInput,
    ) -> Result<LLMResponse, CoreError> {
        let base64_image = general_purpose::STANDARD.encode(&image.data);

        let request = Self::request(vec![
            Part::Text { text: prompt },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.format.mime_type().to_string(),
                    data: base64_image,
                },
            },
        ]);

        self.call_gemini_api(request).await
    }

    async fn generate_with_text(&self, prompt: String) -> Result<LLMResponse, CoreError> {
        let request = Self::request(vec![Part::Text { text: prompt }]);

        self.call_gemini_api(request).await
    }
}
