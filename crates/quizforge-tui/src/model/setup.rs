use quizforge_core::{GenerationParams, MAX_QUESTIONS, MIN_QUESTIONS, QuestionKind, StudyMode};

/// Fields on the quiz setup screen, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Document,
    Count,
    Kind,
    Mode,
    StyleReference,
    Generate,
}

impl SetupField {
    pub fn next(self) -> Self {
        match self {
            Self::Document => Self::Count,
            Self::Count => Self::Kind,
            Self::Kind => Self::Mode,
            Self::Mode => Self::StyleReference,
            Self::StyleReference => Self::Generate,
            Self::Generate => Self::Document,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Document => Self::Generate,
            Self::Count => Self::Document,
            Self::Kind => Self::Count,
            Self::Mode => Self::Kind,
            Self::StyleReference => Self::Mode,
            Self::Generate => Self::StyleReference,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Count => "Questions",
            Self::Kind => "Question type",
            Self::Mode => "Study mode",
            Self::StyleReference => "Style reference",
            Self::Generate => "Generate",
        }
    }
}

/// State for the quiz setup screen.
#[derive(Debug, Clone)]
pub struct SetupState {
    /// Id of the document the quiz will be generated from.
    pub selected_doc: Option<String>,
    pub field: SetupField,
    pub count: u32,
    pub kind: QuestionKind,
    pub mode: StudyMode,
    /// Free-text sample question forwarded to the gateway so generated
    /// questions match its phrasing style.
    pub style_reference: String,
    pub editing: bool,
    pub edit_buffer: String,
}

impl Default for SetupState {
    fn default() -> Self {
        Self {
            selected_doc: None,
            field: SetupField::Document,
            count: 10,
            kind: QuestionKind::MultipleChoice,
            mode: StudyMode::Practice,
            style_reference: String::new(),
            editing: false,
            edit_buffer: String::new(),
        }
    }
}

impl SetupState {
    /// Adjust the question count by `delta`, staying within bounds.
    pub fn bump_count(&mut self, delta: i64) {
        let next = self.count as i64 + delta;
        self.count = next.clamp(MIN_QUESTIONS as i64, MAX_QUESTIONS as i64) as u32;
    }

    /// Build generation parameters from the current field values.
    pub fn params(&self) -> GenerationParams {
        let mut params = GenerationParams::new(self.count, self.kind, self.mode);
        let style = self.style_reference.trim();
        if !style.is_empty() {
            params.style_reference = Some(style.to_string());
        }
        params
    }
}
