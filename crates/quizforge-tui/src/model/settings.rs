use quizforge_core::{Config, QuestionKind, StudyMode};
use quizforge_ingest::DEFAULT_MAX_DOCUMENT_MB;

/// Sections on the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSection {
    Api,
    Generation,
    Display,
}

impl SettingsSection {
    pub fn all() -> &'static [SettingsSection] {
        &[
            SettingsSection::Api,
            SettingsSection::Generation,
            SettingsSection::Display,
        ]
    }

    pub fn next(self) -> Self {
        match self {
            Self::Api => Self::Generation,
            Self::Generation => Self::Display,
            Self::Display => Self::Api,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Api => "API",
            Self::Generation => "Generation Defaults",
            Self::Display => "Display",
        }
    }
}

/// State for the settings screen.
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub section: SettingsSection,
    pub item_cursor: usize,
    pub editing: bool,
    pub edit_buffer: String,
    pub prev_screen: Option<crate::app::Screen>,
    /// Unsaved edits exist.
    pub dirty: bool,
    /// Save-or-discard prompt is showing.
    pub confirm_exit: bool,

    // Editable fields
    pub api_key: String,
    pub question_model: String,
    pub image_model: String,
    pub request_timeout_secs: u64,
    pub default_count: u32,
    pub default_kind: QuestionKind,
    pub default_mode: StudyMode,
    pub max_document_mb: u64,
    pub theme_name: String,
}

impl Default for SettingsState {
    fn default() -> Self {
        let defaults = Config::default();
        Self {
            section: SettingsSection::Api,
            item_cursor: 0,
            editing: false,
            edit_buffer: String::new(),
            prev_screen: None,
            dirty: false,
            confirm_exit: false,
            api_key: String::new(),
            question_model: defaults.question_model,
            image_model: defaults.image_model,
            request_timeout_secs: defaults.request_timeout_secs,
            default_count: 10,
            default_kind: QuestionKind::MultipleChoice,
            default_mode: StudyMode::Practice,
            max_document_mb: DEFAULT_MAX_DOCUMENT_MB,
            theme_name: "hacker".to_string(),
        }
    }
}

impl SettingsState {
    /// Mask a key for display: show first 4 chars then asterisks.
    pub fn mask_key(key: &str) -> String {
        if key.is_empty() {
            "(not set)".to_string()
        } else if key.len() <= 4 {
            "*".repeat(key.len())
        } else {
            format!("{}{}", &key[..4], "*".repeat(key.len() - 4))
        }
    }

    /// Number of editable items in the given section.
    pub fn item_count(section: SettingsSection) -> usize {
        match section {
            SettingsSection::Api => 4,
            SettingsSection::Generation => 4,
            SettingsSection::Display => 1,
        }
    }

    /// Build the gateway config from the current settings values.
    pub fn gateway_config(&self) -> Config {
        let mut config = Config::default();
        if !self.api_key.is_empty() {
            config.api_key = Some(self.api_key.clone());
        }
        if !self.question_model.is_empty() {
            config.question_model = self.question_model.clone();
        }
        if !self.image_model.is_empty() {
            config.image_model = self.image_model.clone();
        }
        config.request_timeout_secs = self.request_timeout_secs.max(1);
        config
    }
}
