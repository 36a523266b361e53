//! AI gateway trait and provider backends for question and image generation.

pub mod gemini;
pub mod mock;
pub mod style;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

use crate::model::{CoverImage, DocumentPayload, GenerationParams, Question};

/// Failure of a single gateway call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("missing API credential")]
    MissingApiKey,
    #[error("rate limited (429)")]
    RateLimited,
    #[error("HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Other(String),
}

/// An external generative-AI provider able to produce quiz content.
///
/// Both operations are single-shot and non-retrying; retry policy is a
/// caller concern.
pub trait AiBackend: Send + Sync {
    /// The display name of this provider (e.g. "Gemini").
    fn name(&self) -> &str;

    /// Generate questions from an embedded document.
    ///
    /// Best-effort with respect to `params.count`. A response body that does
    /// not parse yields `Ok(vec![])`, never an error; records missing
    /// required fields or whose correct answer is not among the options are
    /// dropped.
    fn generate_questions<'a>(
        &'a self,
        document: &'a DocumentPayload,
        params: &'a GenerationParams,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Question>, GatewayError>> + Send + 'a>>;

    /// Generate a cover illustration for a topic label.
    ///
    /// Failure is non-fatal: callers treat `Err` exactly like `Ok(None)`.
    fn generate_cover_image<'a>(
        &'a self,
        topic: &'a str,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Option<CoverImage>, GatewayError>> + Send + 'a>>;
}
