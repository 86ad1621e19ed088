//! Recommender backed by an OpenAI-compatible chat completions API

use super::{RecommendationRequest, RecommendationResponse, Recommender};
use crate::config::LlmSettings;
use crate::error::RecommendError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You are a book recommendation expert. Based on the user's reading \
preferences, you will provide a list of recommended book titles.";

/// Error bodies are cut to this many characters before being logged
const MAX_ERROR_BODY: usize = 500;

pub struct LlmRecommender {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl LlmRecommender {
    pub fn new(settings: &LlmSettings) -> Result<Self, RecommendError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            http,
            url: completions_url(&settings.endpoint),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage; 2],
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn completions_url(endpoint: &str) -> String {
    format!("{}/chat/completions", endpoint.trim_end_matches('/'))
}

fn user_prompt(request: &RecommendationRequest) -> String {
    format!(
        "The user enjoys the following books: {}\n\
         The user enjoys the following authors: {}\n\
         The user enjoys the following genres: {}\n\n\
         Please provide a list of book recommendations that the user might enjoy. \
         Only return the book titles.\n\
         Respond with a JSON object of the form {{\"recommendations\": [\"Title\", ...]}}.",
        request.titles.join(", "),
        request.authors.join(", "),
        request.genres.join(", "),
    )
}

/// Extract the structured answer from the model's message text.
///
/// Models sometimes wrap JSON in a Markdown code fence or answer with a bare
/// array; both are accepted.
fn parse_content(content: &str) -> Result<RecommendationResponse, RecommendError> {
    let mut body = content.trim();
    if let Some(rest) = body.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        body = rest.strip_suffix("```").unwrap_or(rest).trim();
    }

    if let Ok(response) = serde_json::from_str::<RecommendationResponse>(body) {
        return Ok(response);
    }
    serde_json::from_str::<Vec<String>>(body)
        .map(|recommendations| RecommendationResponse { recommendations })
        .map_err(|e| RecommendError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl Recommender for LlmRecommender {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, RecommendError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt(request),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let mut builder = self.http.post(&self.url).json(&body);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY)
                .collect();
            return Err(RecommendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                RecommendError::MalformedResponse("completion has no message content".to_string())
            })?;

        let parsed = parse_content(&content)?;
        tracing::info!("Received {} recommendations", parsed.recommendations.len());
        Ok(parsed)
    }
}
