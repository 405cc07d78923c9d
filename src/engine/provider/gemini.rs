// News search through Gemini generateContent with Google Search grounding

use super::{NewsProvider, ProviderError, check_status};
use crate::engine::news::{GroundingRecord, NEWS_DISPLAY_COUNT, NewsResponse};
use serde::{Deserialize, Serialize};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiNewsProvider {
    client: reqwest::blocking::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiNewsProvider {
    pub fn new(client: reqwest::blocking::Client, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Instructions sent with every search; asks for one pipe-delimited record per line.
pub fn build_prompt(query: &str) -> String {
    format!(
        "Search for news from the last 24 hours about \"{query}\".\n\
         List at least {count} stories. Output one story per line in exactly this format:\n\
         Title | Source | URL | Date\n\
         Use the original article URL (starting with https://). \
         Do not add any other text, numbering or markdown.",
        query = query,
        count = NEWS_DISPLAY_COUNT
    )
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Debug, Default, Deserialize)]
struct WebSource {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate plus its grounding citations.
    pub fn into_news(self) -> NewsResponse {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return NewsResponse::default();
        };

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let grounding = candidate
            .grounding_metadata
            .map(|m| {
                m.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .filter_map(|web| {
                        web.uri.map(|uri| GroundingRecord {
                            title: web.title,
                            uri,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        NewsResponse { text, grounding }
    }
}

/// Decode a raw generateContent JSON body.
pub fn decode_response(body: &str) -> Result<NewsResponse, ProviderError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;
    Ok(parsed.into_news())
}

impl NewsProvider for GeminiNewsProvider {
    fn search_news(&self, query: &str) -> Result<NewsResponse, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let prompt = build_prompt(query);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: &prompt }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        tracing::debug!(model = %self.model, query, "requesting news");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()?;
        let body = check_status(response)?.text()?;
        decode_response(&body)
    }
}
