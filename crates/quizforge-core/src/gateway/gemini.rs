//! REST backend for Google's generative language API.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde_json::{Value, json};

use super::style::{image_prompt, style_hint};
use super::{AiBackend, GatewayError};
use crate::Config;
use crate::model::{CoverImage, DocumentPayload, GenerationParams, Question, new_id};

const USER_AGENT: &str = "QuizForge";

/// Response schema for the question request: the model must answer with a
/// JSON array of question records.
static QUESTION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "text": { "type": "STRING" },
                "type": { "type": "STRING" },
                "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                "correctAnswer": { "type": "STRING" },
                "explanation": { "type": "STRING" },
                "visualPrompt": { "type": "STRING" }
            },
            "required": ["id", "text", "options", "correctAnswer", "explanation", "visualPrompt"]
        }
    })
});

pub struct GeminiBackend {
    api_key: Option<String>,
    question_model: String,
    image_model: String,
    api_base: String,
}

impl GeminiBackend {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            question_model: config.question_model.clone(),
            image_model: config.image_model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }
}

fn system_instruction(style_reference: Option<&str>) -> String {
    let mut instruction = String::from(
        "You are an accelerated-learning mentor. Your mission is to build a deep exam from the attached document.\n\
         \n\
         EXPLANATION RULES:\n\
         - WRITE THE EXPLANATION AS A SINGLE BLOCK OF TEXT (ONE PARAGRAPH).\n\
         - Do NOT use numbering (1., 2.), dashes, or lists.\n\
         - Do NOT open with confirmations such as \"Exactly!\" or \"Correct!\"; the user may have answered wrong, and reading that is confusing.\n\
         - Explain the concept clearly and directly.\n\
         - Focus on why the correct answer is true and give a line of reasoning or an analogy that helps fix it in memory.\n\
         - Keep the tone professional but warm.\n\
         \n\
         TECHNICAL RULES:\n\
         1. LANGUAGE: English.\n\
         2. FORMAT: JSON array.\n\
         3. VISUAL: visualPrompt in English (descriptive).",
    );
    if let Some(reference) = style_reference
        && !reference.trim().is_empty()
    {
        instruction.push_str(&format!(
            "\n\nREFERENCE STYLE: Mimic the tone and level of these questions:\n\"{}\"",
            reference
        ));
    }
    instruction
}

fn question_request(document: &DocumentPayload, params: &GenerationParams) -> Value {
    let prompt = format!(
        "{}\n\nGenerate {} questions of type {} from the attached document.",
        system_instruction(params.style_reference.as_deref()),
        params.count,
        params.kind.wire()
    );
    json!({
        "contents": [{
            "parts": [
                { "text": prompt },
                { "inlineData": { "mimeType": document.mime, "data": document.base64 } }
            ]
        }],
        "generationConfig": {
            "thinkingConfig": { "thinkingBudget": 24000 },
            "responseMimeType": "application/json",
            "responseSchema": &*QUESTION_SCHEMA
        }
    })
}

fn image_request(topic: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": image_prompt(topic) }] }],
        "generationConfig": { "imageConfig": { "aspectRatio": "16:9" } }
    })
}

/// Concatenate the text parts of the first candidate.
fn response_text(data: &Value) -> String {
    let parts = data["candidates"][0]["content"]["parts"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    let mut text = String::new();
    for part in parts {
        if let Some(t) = part["text"].as_str() {
            text.push_str(t);
        }
    }
    text
}

/// Parse the model's answer defensively.
///
/// A body that is not a JSON array yields no questions; records that fail
/// deserialization or the structural rules are dropped one by one. Any
/// answer state the model invented for the records is cleared.
fn parse_questions(body: &str) -> Vec<Question> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return vec![];
    };
    let Some(items) = value.as_array() else {
        return vec![];
    };

    let mut questions = Vec::with_capacity(items.len());
    let mut dropped = 0usize;
    for item in items {
        match serde_json::from_value::<Question>(item.clone()) {
            Ok(mut q) => {
                if q.id.is_empty() {
                    q.id = new_id("q");
                }
                q.user_answer = None;
                q.is_correct = None;
                if q.is_well_formed() {
                    questions.push(q);
                } else {
                    dropped += 1;
                }
            }
            Err(_) => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::warn!(
            dropped,
            kept = questions.len(),
            "dropped malformed question records"
        );
    }
    questions
}

impl AiBackend for GeminiBackend {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn generate_questions<'a>(
        &'a self,
        document: &'a DocumentPayload,
        params: &'a GenerationParams,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Question>, GatewayError>> + Send + 'a>> {
        Box::pin(async move {
            let Some(key) = self.api_key.as_deref() else {
                return Err(GatewayError::MissingApiKey);
            };

            let url = self.generate_url(&self.question_model);
            let body = question_request(document, params);
            tracing::debug!(
                model = %self.question_model,
                count = params.count,
                kind = params.kind.wire(),
                "requesting question generation"
            );

            let resp = client
                .post(&url)
                .header("x-goog-api-key", key)
                .header("User-Agent", USER_AGENT)
                .timeout(timeout)
                .json(&body)
                .send()
                .await
                .map_err(|e| GatewayError::Other(e.to_string()))?;

            let status = resp.status();
            if status.as_u16() == 429 {
                return Err(GatewayError::RateLimited);
            }
            if !status.is_success() {
                return Err(GatewayError::Status(status.as_u16()));
            }

            let data: Value = resp
                .json()
                .await
                .map_err(|e| GatewayError::Other(e.to_string()))?;

            Ok(parse_questions(&response_text(&data)))
        })
    }

    fn generate_cover_image<'a>(
        &'a self,
        topic: &'a str,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Option<CoverImage>, GatewayError>> + Send + 'a>> {
        Box::pin(async move {
            let Some(key) = self.api_key.as_deref() else {
                return Err(GatewayError::MissingApiKey);
            };

            let url = self.generate_url(&self.image_model);
            let body = image_request(topic);
            tracing::debug!(model = %self.image_model, topic, "requesting cover image");

            let resp = client
                .post(&url)
                .header("x-goog-api-key", key)
                .header("User-Agent", USER_AGENT)
                .timeout(timeout)
                .json(&body)
                .send()
                .await
                .map_err(|e| GatewayError::Other(e.to_string()))?;

            let status = resp.status();
            if status.as_u16() == 429 {
                return Err(GatewayError::RateLimited);
            }
            if !status.is_success() {
                return Err(GatewayError::Status(status.as_u16()));
            }

            let data: Value = resp
                .json()
                .await
                .map_err(|e| GatewayError::Other(e.to_string()))?;

            let parts = data["candidates"][0]["content"]["parts"]
                .as_array()
                .cloned()
                .unwrap_or_default();
            for part in parts {
                if let Some(inline) = part.get("inlineData")
                    && let Some(b64) = inline["data"].as_str()
                    && !b64.is_empty()
                {
                    return Ok(Some(CoverImage {
                        base64: b64.to_string(),
                        mime: inline["mimeType"].as_str().unwrap_or("image/png").to_string(),
                        style: style_hint(topic).to_string(),
                    }));
                }
            }
            Ok(None)
        })
    }
}
