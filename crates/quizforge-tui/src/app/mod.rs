mod backend_events;
mod generation;
mod run;
mod update;
mod update_picker;
mod update_settings;

use std::path::PathBuf;

use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use tokio::sync::mpsc;

use quizforge_core::{Document, QuizSession, StudyMode};

use crate::model::history::average_pct;
use crate::model::run::ActiveRun;
use crate::model::settings::SettingsState;
use crate::model::setup::SetupState;
use crate::theme::Theme;
use crate::tui_event::{BackendCommand, GenerationPhase};

/// How long a footer notice stays visible, in ticks.
const NOTICE_TICKS: usize = 50;

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Upload,
    Config,
    Practice,
    Exam,
    Results,
    History,
    Settings,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Upload => "Upload",
            Self::Config => "Quiz Setup",
            Self::Practice => "Practice",
            Self::Exam => "Exam",
            Self::Results => "Results",
            Self::History => "History",
            Self::Settings => "Settings",
        }
    }

    pub fn for_mode(mode: StudyMode) -> Self {
        match mode {
            StudyMode::Practice => Self::Practice,
            StudyMode::Exam => Self::Exam,
        }
    }
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    TextInput,
}

/// Which pane has focus on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPane {
    Documents,
    Recent,
}

/// Severity of a footer notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warn,
}

/// Transient message flashed in the footer.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// Tick at which the notice was raised.
    pub tick: usize,
}

/// State for the upload screen's directory browser.
#[derive(Debug, Clone)]
pub struct FilePickerState {
    /// Current directory being browsed.
    pub current_dir: PathBuf,
    /// Entries in the current directory (dirs first, then files).
    pub entries: Vec<FileEntry>,
    /// Cursor position in the entries list.
    pub cursor: usize,
    /// Files marked for ingestion.
    pub selected: Vec<PathBuf>,
    /// Scroll offset for the entries list.
    pub scroll_offset: usize,
}

/// A single entry in the upload browser.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_supported: bool,
}

impl FilePickerState {
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mut state = Self {
            current_dir,
            entries: Vec::new(),
            cursor: 0,
            selected: Vec::new(),
            scroll_offset: 0,
        };
        state.refresh_entries();
        state
    }

    /// Refresh the entries list from the current directory.
    pub fn refresh_entries(&mut self) {
        let mut entries = Vec::new();

        // Parent directory entry
        if let Some(parent) = self.current_dir.parent() {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
                is_supported: false,
            });
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.current_dir) {
            let mut dirs = Vec::new();
            let mut files = Vec::new();

            for entry in read_dir.flatten() {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();

                // Skip hidden files/dirs
                if name.starts_with('.') {
                    continue;
                }

                if path.is_dir() {
                    dirs.push(FileEntry {
                        name,
                        path,
                        is_dir: true,
                        is_supported: false,
                    });
                } else {
                    let is_supported = quizforge_ingest::is_supported_path(&path);
                    files.push(FileEntry {
                        name,
                        path,
                        is_dir: false,
                        is_supported,
                    });
                }
            }

            dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

            entries.extend(dirs);
            entries.extend(files);
        }

        self.entries = entries;
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Toggle selection of the entry under the cursor (supported files only).
    pub fn toggle_selected(&mut self) {
        if let Some(entry) = self.entries.get(self.cursor)
            && entry.is_supported
        {
            if let Some(pos) = self.selected.iter().position(|p| p == &entry.path) {
                self.selected.remove(pos);
            } else {
                self.selected.push(entry.path.clone());
            }
        }
    }

    /// Enter the directory at cursor, or return false if not a directory.
    pub fn enter_directory(&mut self) -> bool {
        if let Some(entry) = self.entries.get(self.cursor)
            && entry.is_dir
        {
            self.current_dir = entry.path.clone();
            self.refresh_entries();
            return true;
        }
        false
    }

    pub fn is_selected(&self, path: &PathBuf) -> bool {
        self.selected.contains(path)
    }
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,
    pub tick: usize,
    /// Height of the visible list area (set on resize, used for page up/down).
    pub visible_rows: usize,

    /// Document library, newest first.
    pub documents: Vec<Document>,
    /// Completed sessions, newest first.
    pub sessions: Vec<QuizSession>,

    pub dash_pane: DashboardPane,
    pub doc_cursor: usize,
    pub recent_cursor: usize,

    /// Upload screen state.
    pub picker: FilePickerState,
    /// Quiz setup screen state.
    pub setup: SetupState,
    /// Settings screen state.
    pub settings: SettingsState,

    /// A generation request is in flight.
    pub generating: bool,
    pub generation_phase: Option<GenerationPhase>,

    /// The attempt currently being taken.
    pub run: Option<ActiveRun>,
    /// Id of the session shown on the results screen.
    pub results_session: Option<String>,
    /// Cursor over the results review list.
    pub review_cursor: usize,

    pub history_cursor: usize,
    pub search_query: String,

    pub notice: Option<Notice>,

    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(documents: Vec<Document>, theme: Theme) -> Self {
        Self {
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            theme,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            tick: 0,
            visible_rows: 20,
            documents,
            sessions: Vec::new(),
            dash_pane: DashboardPane::Documents,
            doc_cursor: 0,
            recent_cursor: 0,
            picker: FilePickerState::new(),
            setup: SetupState::default(),
            settings: SettingsState::default(),
            generating: false,
            generation_phase: None,
            run: None,
            results_session: None,
            review_cursor: 0,
            history_cursor: 0,
            search_query: String::new(),
            notice: None,
            backend_cmd_tx: None,
        }
    }

    /// Flash an informational message in the footer.
    pub fn notify(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind: NoticeKind::Info,
            text: text.into(),
            tick: self.tick,
        });
    }

    /// Flash a warning in the footer.
    pub fn notify_warn(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind: NoticeKind::Warn,
            text: text.into(),
            tick: self.tick,
        });
    }

    fn expire_notice(&mut self) {
        if let Some(n) = &self.notice
            && self.tick.wrapping_sub(n.tick) >= NOTICE_TICKS
        {
            self.notice = None;
        }
    }

    pub fn document_by_id(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn session_by_id(&self, id: &str) -> Option<&QuizSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// The session shown on the results screen, if still present.
    pub fn current_results(&self) -> Option<&QuizSession> {
        self.results_session
            .as_deref()
            .and_then(|id| self.session_by_id(id))
    }

    /// Ids of documents with stored content, in library order.
    pub fn ready_doc_ids(&self) -> Vec<String> {
        self.documents
            .iter()
            .filter(|d| d.is_ready())
            .map(|d| d.id.clone())
            .collect()
    }

    /// Enter the quiz setup screen, seeding field values from settings
    /// defaults. The style reference carries over between visits.
    fn enter_setup(&mut self, doc_id: Option<String>) {
        let selected = doc_id
            .filter(|id| self.document_by_id(id).is_some_and(|d| d.is_ready()))
            .or_else(|| self.ready_doc_ids().first().cloned());
        let style = std::mem::take(&mut self.setup.style_reference);
        self.setup = SetupState {
            selected_doc: selected,
            count: self.settings.default_count,
            kind: self.settings.default_kind,
            mode: self.settings.default_mode,
            style_reference: style,
            ..SetupState::default()
        };
        self.screen = Screen::Config;
    }

    /// Build the stats line shown right of the header.
    fn build_stats_line(&self) -> Line<'static> {
        let theme = &self.theme;
        let ready = self.documents.iter().filter(|d| d.is_ready()).count();
        let mut spans = vec![
            Span::styled(
                format!("Docs:{}/{} ", ready, self.documents.len()),
                Style::default().fg(theme.text),
            ),
            Span::styled(
                format!("Quizzes:{} ", self.sessions.len()),
                Style::default().fg(theme.dim),
            ),
        ];
        if let Some(avg) = average_pct(&self.sessions) {
            spans.push(Span::styled(
                format!("Avg:{}% ", avg),
                Style::default().fg(theme.score_color(avg)),
            ));
        }
        Line::from(spans)
    }

    // update() is in update.rs

    // handle_upload_action(), queue_ingest() are in update_picker.rs

    // handle_settings_enter(), handle_settings_space(), settings_adjust(),
    // confirm_settings_edit(), save_settings() are in update_settings.rs

    // begin_run(), run_advance(), finalize_run(), retry_session() are in run.rs

    // start_generation() is in generation.rs

    // handle_backend_event() is in backend_events.rs

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        let stats_line = self.build_stats_line();
        crate::view::render_header(f, header_area, &self.theme, self.screen, stats_line);

        match self.screen {
            Screen::Dashboard => crate::view::dashboard::render_in(f, self, body_area, footer_area),
            Screen::Upload => crate::view::upload::render_in(f, self, body_area, footer_area),
            Screen::Config => crate::view::config::render_in(f, self, body_area, footer_area),
            Screen::Practice | Screen::Exam => {
                crate::view::run::render_in(f, self, body_area, footer_area)
            }
            Screen::Results => crate::view::results::render_in(f, self, body_area, footer_area),
            Screen::History => crate::view::history::render_in(f, self, body_area, footer_area),
            Screen::Settings => crate::view::settings::render_in(f, self, body_area, footer_area),
        }

        // Overlays, painter's order
        if self.settings.confirm_exit {
            crate::view::settings_confirm::render(f, &self.theme);
        }

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests;
