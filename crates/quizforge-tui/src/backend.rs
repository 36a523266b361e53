use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use quizforge_core::{
    AiBackend, Config, Document, GenerationParams, QuizSession, derive_title, derive_topic,
};
use quizforge_ingest::IngestedFile;

use crate::model::run::today_stamp;
use crate::tui_event::{BackendEvent, GenerationPhase};

/// Ingest a batch of files, reporting one event per file.
///
/// Reads are blocking calls, so each goes through `spawn_blocking`.
pub async fn run_ingest(
    files: Vec<(String, PathBuf)>,
    max_mb: u64,
    tx: mpsc::UnboundedSender<BackendEvent>,
) {
    for (document_id, path) in files {
        let target = path.clone();
        let result: Result<IngestedFile, String> = tokio::task::spawn_blocking(move || {
            quizforge_ingest::ingest_file(&target, max_mb).map_err(|e| e.to_string())
        })
        .await
        .unwrap_or_else(|e| Err(format!("Task join error: {}", e)));

        let event = match result {
            Ok(file) => BackendEvent::IngestComplete { document_id, file },
            Err(error) => BackendEvent::IngestFailed { document_id, error },
        };
        let _ = tx.send(event);
    }
}

/// Run the full generation pipeline: questions, then cover image, then
/// session assembly.
///
/// Question failure (or an empty question list) aborts the run with
/// `GenerationFailed`. Image failure is silent; the session has no cover.
pub async fn run_generation(
    backend: Arc<dyn AiBackend>,
    document: Document,
    params: GenerationParams,
    config: Config,
    tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    let payload = match document.payload.clone() {
        Some(p) => p,
        None => {
            let _ = tx.send(BackendEvent::GenerationFailed {
                error: format!("document '{}' has no stored content", document.name),
            });
            return;
        }
    };

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());

    let _ = tx.send(BackendEvent::PhaseChanged {
        phase: GenerationPhase::Questions,
    });

    let questions = tokio::select! {
        _ = cancel.cancelled() => return,
        result = backend.generate_questions(&payload, &params, &client, config.question_timeout()) => {
            match result {
                Ok(questions) => questions,
                Err(e) => {
                    let _ = tx.send(BackendEvent::GenerationFailed {
                        error: e.to_string(),
                    });
                    return;
                }
            }
        }
    };

    // Unparseable responses come back as an empty list rather than an error;
    // a session with zero questions is useless either way.
    if questions.is_empty() {
        let _ = tx.send(BackendEvent::GenerationFailed {
            error: "the model returned no usable questions".to_string(),
        });
        return;
    }

    let topic = derive_topic(&document.name);

    let _ = tx.send(BackendEvent::PhaseChanged {
        phase: GenerationPhase::Cover,
    });

    let cover_image = tokio::select! {
        _ = cancel.cancelled() => return,
        result = backend.generate_cover_image(&topic, &client, config.image_timeout()) => {
            result.unwrap_or(None)
        }
    };

    let session = QuizSession::compose(
        derive_title(&document.name),
        topic,
        today_stamp(),
        questions,
        params.mode,
        cover_image,
    );

    let _ = tx.send(BackendEvent::SessionReady { session });
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::gateway::MockBackend;
    use quizforge_core::gateway::mock::{MockImage, MockQuestions};
    use quizforge_core::{DocumentKind, DocumentPayload, QuestionKind, StudyMode};

    fn ready_document() -> Document {
        let mut doc = Document::pending(
            "biology.pdf".to_string(),
            DocumentKind::Pdf,
            "2026-08-25".to_string(),
        );
        doc.payload = Some(DocumentPayload {
            base64: "aGVsbG8=".to_string(),
            mime: "application/pdf".to_string(),
        });
        doc
    }

    async fn drive(backend: MockBackend, document: Document) -> Vec<BackendEvent> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        run_generation(
            Arc::new(backend),
            document,
            GenerationParams::new(5, QuestionKind::MultipleChoice, StudyMode::Practice),
            Config::default(),
            tx,
            CancellationToken::new(),
        )
        .await;

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn pipeline_reports_both_phases_then_a_session() {
        let backend = MockBackend::new("mock", MockQuestions::FromParams, MockImage::Generated);
        let events = drive(backend, ready_document()).await;

        assert!(matches!(
            events[0],
            BackendEvent::PhaseChanged {
                phase: GenerationPhase::Questions
            }
        ));
        assert!(matches!(
            events[1],
            BackendEvent::PhaseChanged {
                phase: GenerationPhase::Cover
            }
        ));
        match events.last() {
            Some(BackendEvent::SessionReady { session }) => {
                assert_eq!(session.questions.len(), 5);
                assert_eq!(session.title, "Quiz: biology.pdf");
                assert_eq!(session.topic, "biology");
                assert!(session.cover_image.is_some());
            }
            other => panic!("expected SessionReady, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_question_list_becomes_a_failure() {
        let backend = MockBackend::new("mock", MockQuestions::Empty, MockImage::Generated);
        let events = drive(backend, ready_document()).await;

        assert!(events.iter().any(|e| matches!(
            e,
            BackendEvent::GenerationFailed { error } if error.contains("no usable questions")
        )));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, BackendEvent::SessionReady { .. }))
        );
    }

    #[tokio::test]
    async fn question_error_aborts_before_the_image_phase() {
        let backend = MockBackend::new(
            "mock",
            MockQuestions::Error("HTTP 500".to_string()),
            MockImage::Generated,
        );
        let events = drive(backend, ready_document()).await;

        assert!(events.iter().any(|e| matches!(
            e,
            BackendEvent::GenerationFailed { error } if error.contains("HTTP 500")
        )));
        assert!(!events.iter().any(|e| matches!(
            e,
            BackendEvent::PhaseChanged {
                phase: GenerationPhase::Cover
            }
        )));
    }

    #[tokio::test]
    async fn image_failure_degrades_to_no_cover() {
        let backend = MockBackend::new(
            "mock",
            MockQuestions::FromParams,
            MockImage::Error("image backend down".to_string()),
        );
        let events = drive(backend, ready_document()).await;

        match events.last() {
            Some(BackendEvent::SessionReady { session }) => {
                assert!(session.cover_image.is_none());
            }
            other => panic!("expected SessionReady, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_payload_fails_without_calling_the_backend() {
        let backend = Arc::new(MockBackend::new(
            "mock",
            MockQuestions::FromParams,
            MockImage::Generated,
        ));
        let document = Document::pending(
            "pending.pdf".to_string(),
            DocumentKind::Pdf,
            "2026-08-25".to_string(),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();
        run_generation(
            backend.clone(),
            document,
            GenerationParams::new(5, QuestionKind::MultipleChoice, StudyMode::Practice),
            Config::default(),
            tx,
            CancellationToken::new(),
        )
        .await;

        assert!(matches!(
            rx.try_recv(),
            Ok(BackendEvent::GenerationFailed { error }) if error.contains("no stored content")
        ));
        assert!(rx.try_recv().is_err());
        assert_eq!(backend.question_calls(), 0);
    }
}
