use std::time::Duration;

pub mod gateway;
pub mod model;
pub mod session;

// Re-export for convenience
pub use gateway::{AiBackend, GatewayError};
pub use model::{
    CoverImage, Document, DocumentKind, DocumentPayload, DocumentStatus, GenerationParams,
    MAX_QUESTIONS, MIN_QUESTIONS, Question, QuestionKind, QuizSession, StudyMode, new_id,
};
pub use session::{derive_title, derive_topic};

/// Configuration for the AI gateway.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub question_model: String,
    pub image_model: String,
    /// Base URL of the generative API (overridable for tests).
    pub api_base: String,
    pub request_timeout_secs: u64,
    pub image_timeout_secs: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("question_model", &self.question_model)
            .field("image_model", &self.image_model)
            .field("api_base", &self.api_base)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("image_timeout_secs", &self.image_timeout_secs)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            question_model: "gemini-3-pro-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            request_timeout_secs: 120,
            image_timeout_secs: 60,
        }
    }
}

impl Config {
    pub fn question_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs.max(1))
    }
}
