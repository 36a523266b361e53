use std::path::PathBuf;

use quizforge_core::{Config, Document, GenerationParams, QuizSession};
use quizforge_ingest::IngestedFile;

/// Commands sent from the UI to the backend task.
#[derive(Debug, Clone)]
pub enum BackendCommand {
    /// Read and encode files from disk. Each entry pairs the id of the
    /// pending document placeholder with the path to ingest.
    IngestFiles {
        files: Vec<(String, PathBuf)>,
        max_mb: u64,
    },
    /// Run the full generation pipeline for one document.
    GenerateSession {
        document: Document,
        params: GenerationParams,
        config: Config,
    },
}

/// Pipeline stage reported while a quiz is being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Questions,
    Cover,
}

impl GenerationPhase {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationPhase::Questions => "Analyzing document",
            GenerationPhase::Cover => "Creating illustration",
        }
    }
}

/// Events sent from the backend task to the UI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    IngestComplete {
        document_id: String,
        file: IngestedFile,
    },
    IngestFailed {
        document_id: String,
        error: String,
    },
    PhaseChanged {
        phase: GenerationPhase,
    },
    SessionReady {
        session: QuizSession,
    },
    GenerationFailed {
        error: String,
    },
}
