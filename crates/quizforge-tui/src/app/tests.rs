use super::*;
use crate::action::Action;
use crate::model::settings::SettingsSection;
use crate::model::setup::SetupField;
use crate::tui_event::BackendEvent;

use quizforge_core::{
    DocumentKind, DocumentPayload, DocumentStatus, Question, QuestionKind, QuizSession,
};
use quizforge_ingest::IngestedFile;

/// Create a minimal App for testing (no backend, no files).
fn test_app() -> App {
    App::new(vec![], Theme::hacker())
}

fn question(id: &str, correct: &str) -> Question {
    Question {
        id: id.to_string(),
        text: format!("Prompt {}", id),
        kind: QuestionKind::MultipleChoice,
        options: vec![
            "Alpha".to_string(),
            "Beta".to_string(),
            "Gamma".to_string(),
            "Delta".to_string(),
        ],
        correct_answer: correct.to_string(),
        explanation: "Alpha is the answer.".to_string(),
        visual_prompt: String::new(),
        user_answer: None,
        is_correct: None,
    }
}

fn sample_session(n: usize, mode: StudyMode) -> QuizSession {
    let questions = (0..n)
        .map(|i| question(&format!("q{}", i), "Alpha"))
        .collect();
    QuizSession::compose(
        "Quiz: biology.pdf".to_string(),
        "biology".to_string(),
        "2026-08-25".to_string(),
        questions,
        mode,
        None,
    )
}

fn ready_document(name: &str) -> Document {
    let mut doc = Document::pending(name.to_string(), DocumentKind::Pdf, "2026-08-25".to_string());
    doc.size_bytes = 2048;
    doc.size_label = "2.0 KB".to_string();
    doc.status = DocumentStatus::Ready;
    doc.payload = Some(DocumentPayload {
        base64: "aGVsbG8=".to_string(),
        mime: "application/pdf".to_string(),
    });
    doc
}

fn file_entry(name: &str, supported: bool) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        path: PathBuf::from(format!("/tmp/{}", name)),
        is_dir: false,
        is_supported: supported,
    }
}

// ── Upload screen ───────────────────────────────────────────────

#[test]
fn add_documents_opens_upload_with_clean_selection() {
    let mut app = test_app();
    app.picker.selected.push(PathBuf::from("/tmp/stale.md"));

    app.update(Action::AddDocuments);

    assert_eq!(app.screen, Screen::Upload);
    assert!(app.picker.selected.is_empty());
}

#[test]
fn esc_on_upload_leaves_library_untouched() {
    let mut app = test_app();
    app.documents.push(ready_document("kept.pdf"));
    app.screen = Screen::Upload;
    app.picker.selected.push(PathBuf::from("/tmp/notes.md"));

    app.update(Action::NavigateBack);

    assert_eq!(app.screen, Screen::Dashboard);
    assert_eq!(app.documents.len(), 1);
    assert!(app.picker.selected.is_empty());
}

#[test]
fn space_selects_supported_file() {
    let mut app = test_app();
    app.screen = Screen::Upload;
    app.picker.entries = vec![file_entry("notes.md", true)];
    app.picker.cursor = 0;

    app.update(Action::ToggleSelect);

    assert_eq!(app.picker.selected, vec![PathBuf::from("/tmp/notes.md")]);
}

#[test]
fn space_ignores_unsupported_file() {
    let mut app = test_app();
    app.screen = Screen::Upload;
    app.picker.entries = vec![file_entry("image.png", false)];
    app.picker.cursor = 0;

    app.update(Action::ToggleSelect);

    assert!(app.picker.selected.is_empty());
}

#[test]
fn space_again_deselects() {
    let mut app = test_app();
    app.screen = Screen::Upload;
    app.picker.entries = vec![file_entry("notes.md", true)];
    app.picker.cursor = 0;

    app.update(Action::ToggleSelect);
    app.update(Action::ToggleSelect);

    assert!(app.picker.selected.is_empty());
}

#[test]
fn enter_on_file_toggles_selection() {
    let mut app = test_app();
    app.screen = Screen::Upload;
    app.picker.entries = vec![file_entry("notes.md", true)];
    app.picker.cursor = 0;

    app.update(Action::Confirm);

    assert_eq!(app.picker.selected, vec![PathBuf::from("/tmp/notes.md")]);
}

#[test]
fn enter_on_directory_descends() {
    let mut app = test_app();
    app.screen = Screen::Upload;

    // Use a path that definitely exists so the refresh succeeds
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    app.picker.entries = vec![FileEntry {
        name: "crate".to_string(),
        path: dir.clone(),
        is_dir: true,
        is_supported: false,
    }];
    app.picker.cursor = 0;

    app.update(Action::Confirm);

    assert_eq!(app.picker.current_dir, dir);
    assert_eq!(app.picker.cursor, 0);
}

#[test]
fn continue_with_no_selection_warns_and_stays() {
    let mut app = test_app();
    app.screen = Screen::Upload;

    app.update(Action::Continue);

    assert_eq!(app.screen, Screen::Upload);
    let notice = app.notice.expect("warning notice");
    assert_eq!(notice.kind, NoticeKind::Warn);
}

#[test]
fn continue_queues_pending_entries_and_opens_setup() {
    let mut app = test_app();
    let (tx, mut rx) = mpsc::unbounded_channel();
    app.backend_cmd_tx = Some(tx);
    app.screen = Screen::Upload;
    app.picker.selected = vec![PathBuf::from("/tmp/notes.md")];

    app.update(Action::Continue);

    assert_eq!(app.screen, Screen::Config);
    assert_eq!(app.documents.len(), 1);
    assert_eq!(app.documents[0].name, "notes.md");
    assert_eq!(app.documents[0].status, DocumentStatus::Pending);
    // Nothing is ready yet, so setup has no document to preselect
    assert!(app.setup.selected_doc.is_none());

    match rx.try_recv().expect("ingest command") {
        BackendCommand::IngestFiles { files, max_mb } => {
            assert_eq!(files.len(), 1);
            assert_eq!(files[0].0, app.documents[0].id);
            assert_eq!(max_mb, app.settings.max_document_mb);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

// ── Ingest events ───────────────────────────────────────────────

#[test]
fn ingest_complete_marks_document_ready() {
    let mut app = test_app();
    let doc = Document::pending(
        "notes.md".to_string(),
        DocumentKind::Markdown,
        "2026-08-25".to_string(),
    );
    let id = doc.id.clone();
    app.documents.push(doc);

    app.handle_backend_event(BackendEvent::IngestComplete {
        document_id: id,
        file: IngestedFile {
            name: "notes.md".to_string(),
            kind: DocumentKind::Markdown,
            size_bytes: 512,
            size_label: "512 B".to_string(),
            payload: DocumentPayload {
                base64: "aGVsbG8=".to_string(),
                mime: "text/markdown".to_string(),
            },
        },
    });

    assert!(app.documents[0].is_ready());
    assert_eq!(app.documents[0].size_label, "512 B");
    let notice = app.notice.expect("ready notice");
    assert_eq!(notice.kind, NoticeKind::Info);
    // Not on the setup screen, so nothing gets preselected
    assert!(app.setup.selected_doc.is_none());
}

#[test]
fn ingest_complete_preselects_when_waiting_on_setup() {
    let mut app = test_app();
    let doc = Document::pending(
        "notes.md".to_string(),
        DocumentKind::Markdown,
        "2026-08-25".to_string(),
    );
    let id = doc.id.clone();
    app.documents.push(doc);
    app.screen = Screen::Config;
    app.setup.selected_doc = None;

    app.handle_backend_event(BackendEvent::IngestComplete {
        document_id: id.clone(),
        file: IngestedFile {
            name: "notes.md".to_string(),
            kind: DocumentKind::Markdown,
            size_bytes: 512,
            size_label: "512 B".to_string(),
            payload: DocumentPayload {
                base64: "aGVsbG8=".to_string(),
                mime: "text/markdown".to_string(),
            },
        },
    });

    assert_eq!(app.setup.selected_doc.as_deref(), Some(id.as_str()));
}

#[test]
fn ingest_failure_marks_document_error() {
    let mut app = test_app();
    let doc = Document::pending(
        "huge.pdf".to_string(),
        DocumentKind::Pdf,
        "2026-08-25".to_string(),
    );
    let id = doc.id.clone();
    app.documents.push(doc);

    app.handle_backend_event(BackendEvent::IngestFailed {
        document_id: id,
        error: "document too large".to_string(),
    });

    assert_eq!(app.documents[0].status, DocumentStatus::Error);
    assert!(!app.documents[0].is_ready());
    let notice = app.notice.expect("failure notice");
    assert_eq!(notice.kind, NoticeKind::Warn);
}

// ── Dashboard ───────────────────────────────────────────────────

#[test]
fn tab_switches_dashboard_pane() {
    let mut app = test_app();
    assert_eq!(app.dash_pane, DashboardPane::Documents);

    app.update(Action::NextSection);
    assert_eq!(app.dash_pane, DashboardPane::Recent);

    app.update(Action::NextSection);
    assert_eq!(app.dash_pane, DashboardPane::Documents);
}

#[test]
fn enter_on_ready_document_opens_setup_with_defaults() {
    let mut app = test_app();
    app.settings.default_count = 15;
    app.settings.default_kind = QuestionKind::TrueFalse;
    app.settings.default_mode = StudyMode::Exam;
    let doc = ready_document("biology.pdf");
    let id = doc.id.clone();
    app.documents.push(doc);

    app.update(Action::Confirm);

    assert_eq!(app.screen, Screen::Config);
    assert_eq!(app.setup.selected_doc.as_deref(), Some(id.as_str()));
    assert_eq!(app.setup.count, 15);
    assert_eq!(app.setup.kind, QuestionKind::TrueFalse);
    assert_eq!(app.setup.mode, StudyMode::Exam);
}

#[test]
fn enter_on_pending_document_warns() {
    let mut app = test_app();
    app.documents.push(Document::pending(
        "still-loading.pdf".to_string(),
        DocumentKind::Pdf,
        "2026-08-25".to_string(),
    ));

    app.update(Action::Confirm);

    assert_eq!(app.screen, Screen::Dashboard);
    let notice = app.notice.expect("warning notice");
    assert_eq!(notice.kind, NoticeKind::Warn);
}

#[test]
fn enter_on_recent_session_opens_results() {
    let mut app = test_app();
    let session = sample_session(3, StudyMode::Practice);
    let id = session.id.clone();
    app.sessions.push(session);
    app.dash_pane = DashboardPane::Recent;

    app.update(Action::Confirm);

    assert_eq!(app.screen, Screen::Results);
    assert_eq!(app.results_session.as_deref(), Some(id.as_str()));
    assert_eq!(app.review_cursor, 0);
}

#[test]
fn style_reference_survives_setup_reentry() {
    let mut app = test_app();
    app.documents.push(ready_document("biology.pdf"));
    app.setup.style_reference = "Which organelle makes ATP?".to_string();

    app.update(Action::Confirm);

    assert_eq!(app.screen, Screen::Config);
    assert_eq!(app.setup.style_reference, "Which organelle makes ATP?");
}

// ── Generation ──────────────────────────────────────────────────

#[test]
fn generate_without_ready_document_warns() {
    let mut app = test_app();
    app.screen = Screen::Config;
    app.setup.selected_doc = None;

    app.update(Action::StartGeneration);

    assert!(!app.generating);
    assert_eq!(app.screen, Screen::Config);
    let notice = app.notice.expect("warning notice");
    assert_eq!(notice.kind, NoticeKind::Warn);
}

#[test]
fn generate_sends_command_once_and_locks_setup() {
    let mut app = test_app();
    let (tx, mut rx) = mpsc::unbounded_channel();
    app.backend_cmd_tx = Some(tx);
    let doc = ready_document("biology.pdf");
    let id = doc.id.clone();
    app.documents.push(doc);
    app.screen = Screen::Config;
    app.setup.selected_doc = Some(id.clone());
    app.setup.count = 12;

    app.update(Action::StartGeneration);

    assert!(app.generating);
    match rx.try_recv().expect("generation command") {
        BackendCommand::GenerateSession {
            document, params, ..
        } => {
            assert_eq!(document.id, id);
            assert_eq!(params.count, 12);
            assert!(params.style_reference.is_none());
        }
        other => panic!("unexpected command: {:?}", other),
    }

    // While in flight the setup screen ignores further requests
    app.update(Action::StartGeneration);
    assert!(rx.try_recv().is_err());
}

#[test]
fn setup_ignores_navigation_while_generating() {
    let mut app = test_app();
    app.screen = Screen::Config;
    app.generating = true;
    app.setup.field = SetupField::Document;

    app.update(Action::MoveDown);
    assert_eq!(app.setup.field, SetupField::Document);

    app.update(Action::Quit);
    assert!(app.confirm_quit);
}

#[test]
fn phase_change_updates_progress_label() {
    let mut app = test_app();
    app.generating = true;

    app.handle_backend_event(BackendEvent::PhaseChanged {
        phase: GenerationPhase::Cover,
    });

    assert_eq!(app.generation_phase, Some(GenerationPhase::Cover));
}

#[test]
fn generation_failure_returns_control_to_setup() {
    let mut app = test_app();
    app.screen = Screen::Config;
    app.generating = true;
    app.generation_phase = Some(GenerationPhase::Questions);

    app.handle_backend_event(BackendEvent::GenerationFailed {
        error: "HTTP 429 from questions endpoint".to_string(),
    });

    assert!(!app.generating);
    assert!(app.generation_phase.is_none());
    assert_eq!(app.screen, Screen::Config);
    let notice = app.notice.expect("failure notice");
    assert_eq!(notice.kind, NoticeKind::Warn);
    assert_eq!(
        notice.text,
        "Generation failed: HTTP 429 from questions endpoint"
    );
}

#[test]
fn session_ready_starts_run_on_mode_screen() {
    let mut app = test_app();
    app.generating = true;

    app.handle_backend_event(BackendEvent::SessionReady {
        session: sample_session(3, StudyMode::Practice),
    });

    assert!(!app.generating);
    assert_eq!(app.screen, Screen::Practice);
    let run = app.run.as_ref().expect("active run");
    assert_eq!(run.session.total_questions, 3);
    assert_eq!(run.current, 0);
}

#[test]
fn exam_session_lands_on_exam_screen() {
    let mut app = test_app();
    app.generating = true;

    app.handle_backend_event(BackendEvent::SessionReady {
        session: sample_session(3, StudyMode::Exam),
    });

    assert_eq!(app.screen, Screen::Exam);
}

// ── Taking a quiz ───────────────────────────────────────────────

fn running_app(n: usize, mode: StudyMode) -> App {
    let mut app = test_app();
    app.handle_backend_event(BackendEvent::SessionReady {
        session: sample_session(n, mode),
    });
    app
}

#[test]
fn digit_answer_reveals_feedback_in_practice() {
    let mut app = running_app(3, StudyMode::Practice);

    app.update(Action::SelectIndex(1)); // "Beta", wrong

    let run = app.run.as_ref().unwrap();
    assert!(run.revealed);
    let q = &run.session.questions[0];
    assert_eq!(q.user_answer.as_deref(), Some("Beta"));
    assert_eq!(q.is_correct, Some(false));
}

#[test]
fn exam_answer_locks_without_verdict() {
    let mut app = running_app(3, StudyMode::Exam);

    app.update(Action::SelectIndex(0)); // "Alpha", correct

    let run = app.run.as_ref().unwrap();
    assert!(!run.revealed);
    assert_eq!(
        run.session.questions[0].user_answer.as_deref(),
        Some("Alpha")
    );
}

#[test]
fn second_answer_on_same_question_is_ignored() {
    let mut app = running_app(3, StudyMode::Practice);

    app.update(Action::SelectIndex(1));
    app.update(Action::SelectIndex(0));

    let q = &app.run.as_ref().unwrap().session.questions[0];
    assert_eq!(q.user_answer.as_deref(), Some("Beta"));
    assert_eq!(q.is_correct, Some(false));
}

#[test]
fn enter_selects_then_advances() {
    let mut app = running_app(3, StudyMode::Practice);

    // First Enter answers with the option under the cursor
    app.update(Action::Confirm);
    assert!(app.run.as_ref().unwrap().revealed);

    // Second Enter moves on
    app.update(Action::Confirm);
    let run = app.run.as_ref().unwrap();
    assert_eq!(run.current, 1);
    assert!(!run.revealed);
}

#[test]
fn advance_requires_an_answer() {
    let mut app = running_app(3, StudyMode::Practice);

    app.update(Action::NextQuestion);

    assert_eq!(app.run.as_ref().unwrap().current, 0);
}

#[test]
fn option_cursor_freezes_after_answer() {
    let mut app = running_app(3, StudyMode::Practice);

    app.update(Action::MoveDown);
    assert_eq!(app.run.as_ref().unwrap().option_cursor, 1);

    app.update(Action::ToggleSelect); // answer "Beta"
    app.update(Action::MoveDown);

    assert_eq!(app.run.as_ref().unwrap().option_cursor, 1);
}

#[test]
fn finishing_last_question_scores_and_shows_results() {
    let mut app = running_app(2, StudyMode::Practice);

    app.update(Action::SelectIndex(0)); // correct
    app.update(Action::Confirm); // next
    app.update(Action::SelectIndex(2)); // "Gamma", wrong
    app.update(Action::Confirm); // past the last question

    assert_eq!(app.screen, Screen::Results);
    assert!(app.run.is_none());
    assert_eq!(app.sessions.len(), 1);
    let session = &app.sessions[0];
    assert_eq!(session.score, 1);
    assert_eq!(session.percentage(), 50);
    assert!(session.time_elapsed.is_some());
    assert_eq!(app.results_session.as_deref(), Some(session.id.as_str()));
}

#[test]
fn esc_finishes_early_scoring_answered_only() {
    let mut app = running_app(3, StudyMode::Practice);

    app.update(Action::SelectIndex(0)); // one correct answer
    app.update(Action::NavigateBack);

    assert_eq!(app.screen, Screen::Results);
    let session = &app.sessions[0];
    assert_eq!(session.score, 1);
    assert_eq!(session.answered_count(), 1);
    assert_eq!(session.total_questions, 3);
}

// ── Results ─────────────────────────────────────────────────────

#[test]
fn retake_starts_fresh_attempt_keeping_original() {
    let mut app = test_app();
    let mut session = sample_session(2, StudyMode::Practice);
    session.answer(0, "Alpha");
    session.finalize(30);
    let original_id = session.id.clone();
    app.sessions.push(session);
    app.results_session = Some(original_id.clone());
    app.screen = Screen::Results;

    app.update(Action::StartGeneration); // r

    assert_eq!(app.screen, Screen::Practice);
    let run = app.run.as_ref().expect("fresh attempt");
    assert_ne!(run.session.id, original_id);
    assert!(run.session.questions.iter().all(|q| q.user_answer.is_none()));
    // The finalized record stays in history untouched
    assert_eq!(app.sessions.len(), 1);
    assert_eq!(app.sessions[0].score, 1);
}

#[test]
fn new_quiz_from_results_opens_setup() {
    let mut app = test_app();
    let doc = ready_document("biology.pdf");
    let id = doc.id.clone();
    app.documents.push(doc);
    app.screen = Screen::Results;

    app.update(Action::Continue);

    assert_eq!(app.screen, Screen::Config);
    assert_eq!(app.setup.selected_doc.as_deref(), Some(id.as_str()));
}

#[test]
fn esc_on_results_returns_to_dashboard() {
    let mut app = test_app();
    app.screen = Screen::Results;

    app.update(Action::NavigateBack);

    assert_eq!(app.screen, Screen::Dashboard);
}

// ── History ─────────────────────────────────────────────────────

#[test]
fn open_history_resets_filter() {
    let mut app = test_app();
    app.search_query = "stale".to_string();
    app.history_cursor = 5;

    app.update(Action::OpenHistory);

    assert_eq!(app.screen, Screen::History);
    assert!(app.search_query.is_empty());
    assert_eq!(app.history_cursor, 0);
}

#[test]
fn search_narrows_history() {
    let mut app = test_app();
    app.sessions.push(sample_session(2, StudyMode::Practice));
    let mut chem = sample_session(2, StudyMode::Exam);
    chem.title = "Quiz: chemistry.pdf".to_string();
    chem.topic = "chemistry".to_string();
    app.sessions.push(chem);
    app.screen = Screen::History;

    app.update(Action::StartSearch);
    assert_eq!(app.input_mode, InputMode::Search);

    for c in "chem".chars() {
        app.update(Action::SearchInput(c));
    }

    let indices =
        crate::model::history::filtered_indices(&app.sessions, &app.search_query);
    assert_eq!(indices, vec![1]);
    assert_eq!(app.history_cursor, 0);
}

#[test]
fn search_confirm_keeps_filter_in_normal_mode() {
    let mut app = test_app();
    app.screen = Screen::History;
    app.update(Action::StartSearch);
    for c in "bio".chars() {
        app.update(Action::SearchInput(c));
    }

    app.update(Action::SearchConfirm);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.search_query, "bio");
}

#[test]
fn enter_opens_the_filtered_session() {
    let mut app = test_app();
    app.sessions.push(sample_session(2, StudyMode::Practice));
    let mut chem = sample_session(2, StudyMode::Exam);
    chem.title = "Quiz: chemistry.pdf".to_string();
    chem.topic = "chemistry".to_string();
    let chem_id = chem.id.clone();
    app.sessions.push(chem);
    app.screen = Screen::History;
    app.search_query = "chem".to_string();

    app.update(Action::Confirm);

    assert_eq!(app.screen, Screen::Results);
    assert_eq!(app.results_session.as_deref(), Some(chem_id.as_str()));
}

#[test]
fn esc_clears_search_before_leaving_history() {
    let mut app = test_app();
    app.screen = Screen::History;
    app.search_query = "bio".to_string();

    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::History);
    assert!(app.search_query.is_empty());

    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::Dashboard);
}

// ── Settings ────────────────────────────────────────────────────

#[test]
fn settings_remembers_where_it_was_opened_from() {
    let mut app = test_app();
    app.screen = Screen::History;

    app.update(Action::OpenSettings);
    assert_eq!(app.screen, Screen::Settings);
    assert_eq!(app.settings.prev_screen, Some(Screen::History));

    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::History);
}

#[test]
fn settings_is_unreachable_mid_run() {
    let mut app = running_app(2, StudyMode::Practice);
    assert_eq!(app.screen, Screen::Practice);

    app.update(Action::OpenSettings);

    assert_eq!(app.screen, Screen::Practice);
    assert!(app.run.is_some());
}

#[test]
fn open_settings_twice_keeps_return_screen() {
    let mut app = test_app();

    app.update(Action::OpenSettings);
    app.update(Action::OpenSettings);

    assert_eq!(app.settings.prev_screen, Some(Screen::Dashboard));

    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::Dashboard);
}

#[test]
fn editing_api_key_sets_dirty() {
    let mut app = test_app();
    app.screen = Screen::Settings;
    app.settings.section = SettingsSection::Api;
    app.settings.item_cursor = 0;

    app.update(Action::Confirm);
    assert!(app.settings.editing);
    assert_eq!(app.input_mode, InputMode::TextInput);

    app.update(Action::SearchInput('k'));
    app.update(Action::SearchConfirm);

    assert!(!app.settings.editing);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.settings.api_key, "k");
    assert!(app.settings.dirty);
}

#[test]
fn space_cycles_default_question_type() {
    let mut app = test_app();
    app.screen = Screen::Settings;
    app.settings.section = SettingsSection::Generation;
    app.settings.item_cursor = 1;
    assert_eq!(app.settings.default_kind, QuestionKind::MultipleChoice);

    app.update(Action::ToggleSelect);

    assert_eq!(app.settings.default_kind, QuestionKind::TrueFalse);
    assert!(app.settings.dirty);
}

#[test]
fn arrows_adjust_default_count() {
    let mut app = test_app();
    app.screen = Screen::Settings;
    app.settings.section = SettingsSection::Generation;
    app.settings.item_cursor = 0;
    assert_eq!(app.settings.default_count, 10);

    app.update(Action::MoveRight);
    assert_eq!(app.settings.default_count, 11);

    app.update(Action::MoveLeft);
    app.update(Action::MoveLeft);
    assert_eq!(app.settings.default_count, 9);
    assert!(app.settings.dirty);
}

#[test]
fn enter_cycles_theme() {
    let mut app = test_app();
    app.screen = Screen::Settings;
    app.settings.section = SettingsSection::Display;
    app.settings.item_cursor = 0;

    app.update(Action::Confirm);
    assert_eq!(app.settings.theme_name, "modern");

    app.update(Action::Confirm);
    assert_eq!(app.settings.theme_name, "hacker");
    assert!(app.settings.dirty);
}

#[test]
fn esc_on_dirty_settings_shows_prompt() {
    let mut app = test_app();
    app.update(Action::OpenSettings);
    app.settings.dirty = true;

    app.update(Action::NavigateBack);

    assert!(app.settings.confirm_exit);
    assert_eq!(app.screen, Screen::Settings);
}

#[test]
fn dirty_prompt_discard_exits_without_saving() {
    let mut app = test_app();
    app.update(Action::OpenSettings);
    app.settings.dirty = true;
    app.update(Action::NavigateBack);

    app.update(Action::NextQuestion); // n

    assert!(!app.settings.confirm_exit);
    assert!(!app.settings.dirty);
    assert_eq!(app.screen, Screen::Dashboard);
}

#[test]
fn dirty_prompt_esc_cancels_back_to_settings() {
    let mut app = test_app();
    app.update(Action::OpenSettings);
    app.settings.dirty = true;
    app.update(Action::NavigateBack);

    app.update(Action::NavigateBack); // cancel the prompt

    assert!(!app.settings.confirm_exit);
    assert!(app.settings.dirty);
    assert_eq!(app.screen, Screen::Settings);
}

#[test]
fn clean_settings_exits_immediately() {
    let mut app = test_app();
    app.update(Action::OpenSettings);

    app.update(Action::NavigateBack);

    assert_eq!(app.screen, Screen::Dashboard);
    assert!(!app.settings.confirm_exit);
}

// ── Global chrome ───────────────────────────────────────────────

#[test]
fn quit_needs_confirmation() {
    let mut app = test_app();

    assert!(!app.update(Action::Quit));
    assert!(app.confirm_quit);
    assert!(!app.should_quit);

    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}

#[test]
fn quit_prompt_esc_cancels() {
    let mut app = test_app();
    app.update(Action::Quit);

    app.update(Action::NavigateBack);

    assert!(!app.confirm_quit);
    assert!(!app.should_quit);
}

#[test]
fn help_overlay_swallows_navigation() {
    let mut app = test_app();
    app.documents.push(ready_document("a.pdf"));
    app.documents.push(ready_document("b.pdf"));

    app.update(Action::ToggleHelp);
    assert!(app.show_help);

    app.update(Action::MoveDown);
    assert_eq!(app.doc_cursor, 0);

    app.update(Action::NavigateBack);
    assert!(!app.show_help);
    assert_eq!(app.screen, Screen::Dashboard);
}

#[test]
fn resize_tracks_visible_rows() {
    let mut app = test_app();

    app.update(Action::Resize(100, 40));

    assert_eq!(app.visible_rows, 35);
}

#[test]
fn notice_expires_after_a_while() {
    let mut app = test_app();
    app.notify("saved");

    for _ in 0..NOTICE_TICKS - 1 {
        app.update(Action::Tick);
    }
    assert!(app.notice.is_some());

    app.update(Action::Tick);
    assert!(app.notice.is_none());
}
