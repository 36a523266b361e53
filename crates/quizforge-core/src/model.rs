//! Domain records: documents, questions, sessions, generation parameters.

use serde::{Deserialize, Serialize};

/// Lower bound on the number of questions in a generated session.
pub const MIN_QUESTIONS: u32 = 3;
/// Upper bound on the number of questions in a generated session.
pub const MAX_QUESTIONS: u32 = 50;

/// Generate a process-unique id with the given prefix.
///
/// Millisecond timestamp plus a random suffix, so ids created in the same
/// millisecond (e.g. a multi-file upload) stay distinct.
pub fn new_id(prefix: &str) -> String {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{}-{}-{:04x}", prefix, millis, fastrand::u16(..))
}

/// The kind of question the gateway is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    Mixed,
}

impl Default for QuestionKind {
    fn default() -> Self {
        QuestionKind::MultipleChoice
    }
}

impl QuestionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::MultipleChoice => "Multiple choice",
            Self::TrueFalse => "True / false",
            Self::Mixed => "Mixed",
        }
    }

    /// Wire name as it appears in gateway payloads.
    pub fn wire(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::TrueFalse => "true_false",
            Self::Mixed => "mixed",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "multiple_choice" => Some(Self::MultipleChoice),
            "true_false" => Some(Self::TrueFalse),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }

    /// Cycle to the next kind (for the setup screen selector).
    pub fn next(self) -> Self {
        match self {
            Self::MultipleChoice => Self::TrueFalse,
            Self::TrueFalse => Self::Mixed,
            Self::Mixed => Self::MultipleChoice,
        }
    }
}

/// How a session is taken: immediate feedback or deferred scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    Practice,
    Exam,
}

impl StudyMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Practice => "Practice",
            Self::Exam => "Exam",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Practice => Self::Exam,
            Self::Exam => Self::Practice,
        }
    }
}

/// Lifecycle of a library document.
///
/// Exactly one transition happens after creation: `Pending` becomes `Ready`
/// (payload attached) or `Error`; the record is never touched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Ready,
    Pending,
    Error,
}

impl DocumentStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Pending => "pending",
            Self::Error => "error",
        }
    }
}

/// Supported source document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Markdown,
    Text,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "md" | "markdown" => Some(Self::Markdown),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    /// Media type sent alongside the inline payload.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Markdown => "text/markdown",
            Self::Text => "text/plain",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Markdown => "MD",
            Self::Text => "TXT",
        }
    }
}

/// The embedded binary content of a ready document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    pub base64: String,
    pub mime: String,
}

/// A document in the in-memory library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub size_label: String,
    pub size_bytes: u64,
    pub uploaded_at: String,
    pub status: DocumentStatus,
    pub kind: DocumentKind,
    #[serde(default)]
    pub payload: Option<DocumentPayload>,
}

impl Document {
    /// A fresh library entry awaiting ingestion.
    pub fn pending(name: String, kind: DocumentKind, uploaded_at: String) -> Self {
        Self {
            id: new_id("doc"),
            name,
            size_label: String::new(),
            size_bytes: 0,
            uploaded_at,
            status: DocumentStatus::Pending,
            kind,
            payload: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == DocumentStatus::Ready && self.payload.is_some()
    }
}

/// One quiz question, including post-answer state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default)]
    pub visual_prompt: String,
    #[serde(default)]
    pub user_answer: Option<String>,
    #[serde(default)]
    pub is_correct: Option<bool>,
}

impl Question {
    /// Whether the record satisfies the structural rules: non-empty prompt,
    /// at least two options, and the correct answer among them.
    pub fn is_well_formed(&self) -> bool {
        !self.text.is_empty()
            && self.options.len() >= 2
            && self.options.contains(&self.correct_answer)
    }

    pub fn is_answered(&self) -> bool {
        self.user_answer.is_some()
    }

    pub fn reset_answer(&mut self) {
        self.user_answer = None;
        self.is_correct = None;
    }
}

/// Cover illustration returned by the gateway (payload plus the style hint
/// it was generated with).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    pub base64: String,
    pub mime: String,
    pub style: String,
}

/// One complete quiz instance: question set, mode, and outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub date: String,
    pub score: u32,
    pub total_questions: u32,
    pub questions: Vec<Question>,
    pub mode: StudyMode,
    #[serde(default)]
    pub cover_image: Option<CoverImage>,
    #[serde(default)]
    pub time_elapsed: Option<u64>,
}

/// Parameters for a generation request.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub count: u32,
    pub kind: QuestionKind,
    pub mode: StudyMode,
    pub style_reference: Option<String>,
}

impl GenerationParams {
    pub fn new(count: u32, kind: QuestionKind, mode: StudyMode) -> Self {
        Self {
            count: Self::clamp_count(count),
            kind,
            mode,
            style_reference: None,
        }
    }

    pub fn clamp_count(count: u32) -> u32 {
        count.clamp(MIN_QUESTIONS, MAX_QUESTIONS)
    }
}
