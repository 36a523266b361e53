//! Mock gateway backend for tests and offline runs.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{AiBackend, GatewayError};
use crate::model::{CoverImage, DocumentPayload, GenerationParams, Question, QuestionKind};

/// A configurable question response for [`MockBackend`].
#[derive(Clone, Debug)]
pub enum MockQuestions {
    /// Return this exact list.
    Fixed(Vec<Question>),
    /// Build a plausible list sized from the request parameters.
    FromParams,
    /// Simulate a body that parsed to nothing.
    Empty,
    /// Simulate a 429.
    RateLimited,
    /// Simulate a generic failure.
    Error(String),
}

/// A configurable image response for [`MockBackend`].
#[derive(Clone, Debug)]
pub enum MockImage {
    /// Return a tiny placeholder payload styled for the topic.
    Generated,
    /// The provider produced no image part.
    Absent,
    /// Simulate a generic failure.
    Error(String),
}

/// A hand-rolled mock implementing [`AiBackend`] for tests.
///
/// Supports:
/// - A fixed response per operation, **or**
/// - A sequence of responses (one per call, repeating the last if exhausted).
/// - Optional per-call latency.
/// - Call counting per operation.
pub struct MockBackend {
    name: &'static str,
    question_responses: Mutex<Vec<MockQuestions>>,
    question_fallback: MockQuestions,
    image_responses: Mutex<Vec<MockImage>>,
    image_fallback: MockImage,
    delay: Option<Duration>,
    question_calls: AtomicUsize,
    image_calls: AtomicUsize,
}

impl MockBackend {
    /// A mock that always returns the given responses.
    pub fn new(name: &'static str, questions: MockQuestions, image: MockImage) -> Self {
        Self {
            name,
            question_responses: Mutex::new(Vec::new()),
            question_fallback: questions,
            image_responses: Mutex::new(Vec::new()),
            image_fallback: image,
            delay: None,
            question_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
        }
    }

    /// The backend used by `--offline`: sized sample output, no image.
    pub fn offline() -> Self {
        Self::new("Offline sample", MockQuestions::FromParams, MockImage::Absent)
            .with_delay(Duration::from_millis(400))
    }

    /// Queue question responses returned in order, repeating the last one.
    pub fn with_question_sequence(mut self, mut responses: Vec<MockQuestions>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        // Reverse so we can pop() from the back cheaply.
        responses.reverse();
        self.question_fallback = responses.first().cloned().unwrap();
        self.question_responses = Mutex::new(responses);
        self
    }

    /// Queue image responses returned in order, repeating the last one.
    pub fn with_image_sequence(mut self, mut responses: Vec<MockImage>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        responses.reverse();
        self.image_fallback = responses.first().cloned().unwrap();
        self.image_responses = Mutex::new(responses);
        self
    }

    /// Set simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn question_calls(&self) -> usize {
        self.question_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    fn next_question_response(&self) -> MockQuestions {
        let mut seq = self.question_responses.lock().unwrap();
        seq.pop().unwrap_or_else(|| self.question_fallback.clone())
    }

    fn next_image_response(&self) -> MockImage {
        let mut seq = self.image_responses.lock().unwrap();
        seq.pop().unwrap_or_else(|| self.image_fallback.clone())
    }
}

/// Build `count` plausible questions of the requested kind.
///
/// Mixed alternates between multiple choice and true/false, like real
/// generation output does.
pub fn sample_questions(count: u32, kind: QuestionKind) -> Vec<Question> {
    (0..count)
        .map(|i| {
            let effective = match kind {
                QuestionKind::Mixed if i % 2 == 1 => QuestionKind::TrueFalse,
                QuestionKind::Mixed => QuestionKind::MultipleChoice,
                other => other,
            };
            let (options, correct) = match effective {
                QuestionKind::TrueFalse => {
                    (vec!["True".to_string(), "False".to_string()], "True")
                }
                _ => (
                    vec![
                        format!("Option A{}", i + 1),
                        format!("Option B{}", i + 1),
                        format!("Option C{}", i + 1),
                        format!("Option D{}", i + 1),
                    ],
                    "",
                ),
            };
            let correct_answer = if correct.is_empty() {
                options[0].clone()
            } else {
                correct.to_string()
            };
            Question {
                id: format!("sample-{}", i + 1),
                text: format!("Sample question {} about the document.", i + 1),
                kind: effective,
                options,
                correct_answer,
                explanation: format!(
                    "The key idea behind sample question {} in one paragraph.",
                    i + 1
                ),
                visual_prompt: "simple study illustration".to_string(),
                user_answer: None,
                is_correct: None,
            }
        })
        .collect()
}

impl AiBackend for MockBackend {
    fn name(&self) -> &str {
        self.name
    }

    fn generate_questions<'a>(
        &'a self,
        _document: &'a DocumentPayload,
        params: &'a GenerationParams,
        _client: &'a reqwest::Client,
        _timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Question>, GatewayError>> + Send + 'a>> {
        self.question_calls.fetch_add(1, Ordering::SeqCst);
        let response = self.next_question_response();
        let delay = self.delay;
        let count = params.count;
        let kind = params.kind;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            match response {
                MockQuestions::Fixed(questions) => Ok(questions),
                MockQuestions::FromParams => Ok(sample_questions(count, kind)),
                MockQuestions::Empty => Ok(vec![]),
                MockQuestions::RateLimited => Err(GatewayError::RateLimited),
                MockQuestions::Error(msg) => Err(GatewayError::Other(msg)),
            }
        })
    }

    fn generate_cover_image<'a>(
        &'a self,
        topic: &'a str,
        _client: &'a reqwest::Client,
        _timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Option<CoverImage>, GatewayError>> + Send + 'a>> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        let response = self.next_image_response();
        let delay = self.delay;
        let style = super::style::style_hint(topic).to_string();

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            match response {
                MockImage::Generated => Ok(Some(CoverImage {
                    // 1x1 placeholder; realistic payloads are opaque anyway
                    base64: "iVBORw0KGgoAAAANSUhEUg==".to_string(),
                    mime: "image/png".to_string(),
                    style,
                })),
                MockImage::Absent => Ok(None),
                MockImage::Error(msg) => Err(GatewayError::Other(msg)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudyMode;

    fn payload() -> DocumentPayload {
        DocumentPayload {
            base64: "QUJD".to_string(),
            mime: "application/pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn from_params_honors_count_and_kind() {
        let backend = MockBackend::new("mock", MockQuestions::FromParams, MockImage::Absent);
        let client = reqwest::Client::new();
        let params = GenerationParams::new(6, QuestionKind::Mixed, StudyMode::Practice);

        let questions = backend
            .generate_questions(&payload(), &params, &client, Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(questions.len(), 6);
        assert!(questions.iter().all(|q| q.is_well_formed()));
        assert!(questions.iter().any(|q| q.kind == QuestionKind::TrueFalse));
        assert!(
            questions
                .iter()
                .any(|q| q.kind == QuestionKind::MultipleChoice)
        );
        assert_eq!(backend.question_calls(), 1);
    }

    #[tokio::test]
    async fn sequences_repeat_last_response() {
        let backend = MockBackend::new("mock", MockQuestions::Empty, MockImage::Absent)
            .with_question_sequence(vec![
                MockQuestions::Error("boom".to_string()),
                MockQuestions::FromParams,
            ]);
        let client = reqwest::Client::new();
        let params = GenerationParams::new(3, QuestionKind::MultipleChoice, StudyMode::Exam);

        let first = backend
            .generate_questions(&payload(), &params, &client, Duration::from_secs(1))
            .await;
        assert!(matches!(first, Err(GatewayError::Other(_))));

        for _ in 0..2 {
            let next = backend
                .generate_questions(&payload(), &params, &client, Duration::from_secs(1))
                .await
                .unwrap();
            assert_eq!(next.len(), 3);
        }
        assert_eq!(backend.question_calls(), 3);
    }

    #[tokio::test]
    async fn generated_image_carries_topic_style() {
        let backend = MockBackend::new("mock", MockQuestions::Empty, MockImage::Generated);
        let client = reqwest::Client::new();

        let image = backend
            .generate_cover_image("History of Rome", &client, Duration::from_secs(1))
            .await
            .unwrap()
            .expect("image");
        assert!(image.style.contains("historical painting"));
        assert_eq!(image.mime, "image/png");
        assert_eq!(backend.image_calls(), 1);
    }
}
