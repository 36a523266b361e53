use super::{App, DashboardPane, InputMode, Screen};
use crate::action::Action;
use crate::model::history::filtered_indices;
use crate::model::settings::SettingsState;
use crate::model::setup::SetupField;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        // Quit confirmation modal — q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack => {
                    self.confirm_quit = false;
                }
                Action::Tick => {
                    self.tick = self.tick.wrapping_add(1);
                }
                Action::Resize(_w, h) => {
                    self.visible_rows = (h as usize).saturating_sub(5);
                }
                _ => {}
            }
            return false;
        }

        // Settings "unsaved changes" prompt
        if self.settings.confirm_exit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                // y key (mapped to Affirm in normal mode) = save & exit
                Action::Affirm => {
                    self.save_settings();
                    self.settings.confirm_exit = false;
                    self.leave_settings();
                }
                // n key (mapped to NextQuestion in normal mode) = discard & exit
                Action::NextQuestion => {
                    self.settings.confirm_exit = false;
                    self.settings.dirty = false;
                    self.leave_settings();
                }
                // Esc = cancel, stay on settings
                Action::NavigateBack => {
                    self.settings.confirm_exit = false;
                }
                Action::Tick => {
                    self.tick = self.tick.wrapping_add(1);
                }
                Action::Resize(_w, h) => {
                    self.visible_rows = (h as usize).saturating_sub(5);
                }
                _ => {}
            }
            return false;
        }

        // Help overlay
        if self.show_help {
            match action {
                Action::Quit => {
                    self.confirm_quit = true;
                }
                Action::ToggleHelp | Action::NavigateBack => {
                    self.show_help = false;
                }
                Action::Tick => {
                    self.tick = self.tick.wrapping_add(1);
                }
                Action::Resize(_w, h) => {
                    self.visible_rows = (h as usize).saturating_sub(5);
                }
                _ => {}
            }
            return false;
        }

        // While a generation is in flight the setup screen only ticks; there
        // is no mid-flight cancel short of quitting.
        if self.generating && self.screen == Screen::Config {
            match action {
                Action::Quit => {
                    self.confirm_quit = true;
                }
                Action::Tick => {
                    self.tick = self.tick.wrapping_add(1);
                    self.expire_notice();
                }
                Action::Resize(_w, h) => {
                    self.visible_rows = (h as usize).saturating_sub(5);
                }
                _ => {}
            }
            return false;
        }

        // Upload screen
        if self.screen == Screen::Upload {
            self.handle_upload_action(action);
            return false;
        }

        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::ToggleHelp => {
                self.show_help = true;
            }
            Action::NavigateBack => match self.screen {
                Screen::Dashboard => {}
                Screen::Config => {
                    self.screen = Screen::Upload;
                }
                Screen::Practice | Screen::Exam => {
                    // Leaving early scores whatever was answered
                    self.finalize_run();
                }
                Screen::Results => {
                    self.screen = Screen::Dashboard;
                }
                Screen::History => {
                    if !self.search_query.is_empty() {
                        self.search_query.clear();
                        self.history_cursor = 0;
                    } else {
                        self.screen = Screen::Dashboard;
                    }
                }
                Screen::Settings => {
                    // Clean up any in-progress editing
                    self.settings.editing = false;
                    self.settings.edit_buffer.clear();
                    self.input_mode = InputMode::Normal;

                    if self.settings.dirty && !self.settings.confirm_exit {
                        // Show "unsaved changes" prompt instead of exiting
                        self.settings.confirm_exit = true;
                    } else {
                        self.settings.confirm_exit = false;
                        self.leave_settings();
                    }
                }
                Screen::Upload => {}
            },
            Action::Confirm => match self.screen {
                Screen::Dashboard => match self.dash_pane {
                    DashboardPane::Documents => {
                        if let Some(doc) = self.documents.get(self.doc_cursor) {
                            if doc.is_ready() {
                                let id = doc.id.clone();
                                self.enter_setup(Some(id));
                            } else {
                                let name = doc.name.clone();
                                self.notify_warn(format!("'{}' has no stored content yet", name));
                            }
                        }
                    }
                    DashboardPane::Recent => {
                        if let Some(session) = self.sessions.get(self.recent_cursor) {
                            self.results_session = Some(session.id.clone());
                            self.review_cursor = 0;
                            self.screen = Screen::Results;
                        }
                    }
                },
                Screen::Config => self.handle_setup_enter(),
                Screen::Practice | Screen::Exam => {
                    let answered = self.run.as_ref().is_some_and(|r| r.current_answered());
                    if answered {
                        self.run_advance();
                    } else if let Some(run) = self.run.as_mut() {
                        let cursor = run.option_cursor;
                        run.select_option(cursor);
                    }
                }
                Screen::History => {
                    let indices = filtered_indices(&self.sessions, &self.search_query);
                    if let Some(&idx) = indices.get(self.history_cursor)
                        && let Some(session) = self.sessions.get(idx)
                    {
                        self.results_session = Some(session.id.clone());
                        self.review_cursor = 0;
                        self.screen = Screen::Results;
                    }
                }
                Screen::Settings => self.handle_settings_enter(),
                Screen::Results | Screen::Upload => {}
            },
            Action::MoveDown => match self.screen {
                Screen::Dashboard => match self.dash_pane {
                    DashboardPane::Documents => {
                        let max = self.documents.len().saturating_sub(1);
                        if self.doc_cursor < max {
                            self.doc_cursor += 1;
                        }
                    }
                    DashboardPane::Recent => {
                        let max = self.sessions.len().saturating_sub(1);
                        if self.recent_cursor < max {
                            self.recent_cursor += 1;
                        }
                    }
                },
                Screen::Config => self.setup.field = self.setup.field.next(),
                Screen::Practice | Screen::Exam => {
                    if let Some(run) = self.run.as_mut()
                        && !run.current_answered()
                    {
                        let max = run
                            .current_question()
                            .map(|q| q.options.len())
                            .unwrap_or(0)
                            .saturating_sub(1);
                        if run.option_cursor < max {
                            run.option_cursor += 1;
                        }
                    }
                }
                Screen::Results => {
                    let max = self
                        .current_results()
                        .map(|s| s.questions.len())
                        .unwrap_or(0)
                        .saturating_sub(1);
                    if self.review_cursor < max {
                        self.review_cursor += 1;
                    }
                }
                Screen::History => {
                    let max = filtered_indices(&self.sessions, &self.search_query)
                        .len()
                        .saturating_sub(1);
                    if self.history_cursor < max {
                        self.history_cursor += 1;
                    }
                }
                Screen::Settings => {
                    let max = SettingsState::item_count(self.settings.section).saturating_sub(1);
                    if self.settings.item_cursor < max {
                        self.settings.item_cursor += 1;
                    }
                }
                Screen::Upload => {}
            },
            Action::MoveUp => match self.screen {
                Screen::Dashboard => match self.dash_pane {
                    DashboardPane::Documents => {
                        self.doc_cursor = self.doc_cursor.saturating_sub(1);
                    }
                    DashboardPane::Recent => {
                        self.recent_cursor = self.recent_cursor.saturating_sub(1);
                    }
                },
                Screen::Config => self.setup.field = self.setup.field.prev(),
                Screen::Practice | Screen::Exam => {
                    if let Some(run) = self.run.as_mut()
                        && !run.current_answered()
                    {
                        run.option_cursor = run.option_cursor.saturating_sub(1);
                    }
                }
                Screen::Results => self.review_cursor = self.review_cursor.saturating_sub(1),
                Screen::History => self.history_cursor = self.history_cursor.saturating_sub(1),
                Screen::Settings => {
                    self.settings.item_cursor = self.settings.item_cursor.saturating_sub(1);
                }
                Screen::Upload => {}
            },
            Action::MoveLeft => match self.screen {
                Screen::Dashboard => self.dash_pane = DashboardPane::Documents,
                Screen::Config => self.setup_adjust(-1),
                Screen::Settings => self.settings_adjust(-1),
                _ => {}
            },
            Action::MoveRight => match self.screen {
                Screen::Dashboard => self.dash_pane = DashboardPane::Recent,
                Screen::Config => self.setup_adjust(1),
                Screen::Settings => self.settings_adjust(1),
                _ => {}
            },
            Action::PageDown => {
                let page = self.visible_rows.max(1);
                match self.screen {
                    Screen::Dashboard => match self.dash_pane {
                        DashboardPane::Documents => {
                            self.doc_cursor =
                                (self.doc_cursor + page).min(self.documents.len().saturating_sub(1));
                        }
                        DashboardPane::Recent => {
                            self.recent_cursor = (self.recent_cursor + page)
                                .min(self.sessions.len().saturating_sub(1));
                        }
                    },
                    Screen::Results => {
                        let max = self
                            .current_results()
                            .map(|s| s.questions.len())
                            .unwrap_or(0)
                            .saturating_sub(1);
                        self.review_cursor = (self.review_cursor + page).min(max);
                    }
                    Screen::History => {
                        let max = filtered_indices(&self.sessions, &self.search_query)
                            .len()
                            .saturating_sub(1);
                        self.history_cursor = (self.history_cursor + page).min(max);
                    }
                    _ => {}
                }
            }
            Action::PageUp => {
                let page = self.visible_rows.max(1);
                match self.screen {
                    Screen::Dashboard => match self.dash_pane {
                        DashboardPane::Documents => {
                            self.doc_cursor = self.doc_cursor.saturating_sub(page);
                        }
                        DashboardPane::Recent => {
                            self.recent_cursor = self.recent_cursor.saturating_sub(page);
                        }
                    },
                    Screen::Results => self.review_cursor = self.review_cursor.saturating_sub(page),
                    Screen::History => {
                        self.history_cursor = self.history_cursor.saturating_sub(page);
                    }
                    _ => {}
                }
            }
            Action::GoTop => match self.screen {
                Screen::Dashboard => match self.dash_pane {
                    DashboardPane::Documents => self.doc_cursor = 0,
                    DashboardPane::Recent => self.recent_cursor = 0,
                },
                Screen::Config => self.setup.field = SetupField::Document,
                Screen::Results => self.review_cursor = 0,
                Screen::History => self.history_cursor = 0,
                Screen::Settings => self.settings.item_cursor = 0,
                _ => {}
            },
            Action::GoBottom => match self.screen {
                Screen::Dashboard => match self.dash_pane {
                    DashboardPane::Documents => {
                        self.doc_cursor = self.documents.len().saturating_sub(1);
                    }
                    DashboardPane::Recent => {
                        self.recent_cursor = self.sessions.len().saturating_sub(1);
                    }
                },
                Screen::Config => self.setup.field = SetupField::Generate,
                Screen::Results => {
                    self.review_cursor = self
                        .current_results()
                        .map(|s| s.questions.len())
                        .unwrap_or(0)
                        .saturating_sub(1);
                }
                Screen::History => {
                    self.history_cursor = filtered_indices(&self.sessions, &self.search_query)
                        .len()
                        .saturating_sub(1);
                }
                Screen::Settings => {
                    self.settings.item_cursor =
                        SettingsState::item_count(self.settings.section).saturating_sub(1);
                }
                _ => {}
            },
            Action::NextSection => match self.screen {
                Screen::Dashboard => {
                    self.dash_pane = match self.dash_pane {
                        DashboardPane::Documents => DashboardPane::Recent,
                        DashboardPane::Recent => DashboardPane::Documents,
                    };
                }
                Screen::Config => self.setup.field = self.setup.field.next(),
                Screen::Settings => {
                    self.settings.section = self.settings.section.next();
                    self.settings.item_cursor = 0;
                }
                _ => {}
            },
            Action::SelectIndex(idx) => {
                if matches!(self.screen, Screen::Practice | Screen::Exam)
                    && let Some(run) = self.run.as_mut()
                {
                    run.select_option(idx);
                }
            }
            Action::NextQuestion => {
                if matches!(self.screen, Screen::Practice | Screen::Exam) {
                    self.run_advance();
                }
            }
            Action::AddDocuments => match self.screen {
                Screen::Dashboard | Screen::Config | Screen::History | Screen::Results => {
                    self.picker.selected.clear();
                    self.picker.refresh_entries();
                    self.screen = Screen::Upload;
                }
                _ => {}
            },
            Action::OpenSettings => {
                // The run screens keep focus until the run is finalized.
                if !matches!(
                    self.screen,
                    Screen::Settings | Screen::Practice | Screen::Exam
                ) {
                    self.settings.prev_screen = Some(self.screen);
                    self.screen = Screen::Settings;
                }
            }
            Action::OpenHistory => match self.screen {
                Screen::Dashboard | Screen::Results => {
                    self.history_cursor = 0;
                    self.search_query.clear();
                    self.screen = Screen::History;
                }
                _ => {}
            },
            Action::StartGeneration => match self.screen {
                Screen::Config => self.start_generation(),
                Screen::Results => {
                    if let Some(id) = self.results_session.clone() {
                        self.retry_session(&id);
                    }
                }
                Screen::History => {
                    let indices = filtered_indices(&self.sessions, &self.search_query);
                    if let Some(&idx) = indices.get(self.history_cursor)
                        && let Some(id) = self.sessions.get(idx).map(|s| s.id.clone())
                    {
                        self.retry_session(&id);
                    }
                }
                _ => {}
            },
            Action::ToggleSelect => match self.screen {
                Screen::Settings => self.handle_settings_space(),
                Screen::Practice | Screen::Exam => {
                    if let Some(run) = self.run.as_mut()
                        && !run.current_answered()
                    {
                        let cursor = run.option_cursor;
                        run.select_option(cursor);
                    }
                }
                _ => {}
            },
            Action::Continue => {
                if self.screen == Screen::Results {
                    self.enter_setup(None);
                }
            }
            Action::Affirm => {}
            Action::SaveSettings => {
                if self.screen == Screen::Settings {
                    self.save_settings();
                    self.leave_settings();
                }
            }
            Action::StartSearch => {
                if self.screen == Screen::History {
                    self.input_mode = InputMode::Search;
                    self.search_query.clear();
                    self.history_cursor = 0;
                }
            }
            Action::SearchInput(c) => {
                if self.settings.editing {
                    if c == '\x08' {
                        self.settings.edit_buffer.pop();
                    } else {
                        self.settings.edit_buffer.push(c);
                    }
                } else if self.setup.editing {
                    if c == '\x08' {
                        self.setup.edit_buffer.pop();
                    } else {
                        self.setup.edit_buffer.push(c);
                    }
                } else {
                    if c == '\x08' {
                        self.search_query.pop();
                    } else {
                        self.search_query.push(c);
                    }
                    if self.screen == Screen::History {
                        self.history_cursor = 0;
                    }
                }
            }
            Action::SearchConfirm => {
                if self.settings.editing {
                    self.confirm_settings_edit();
                } else if self.setup.editing {
                    self.confirm_setup_edit();
                } else {
                    self.input_mode = InputMode::Normal;
                }
            }
            Action::SearchCancel => {
                if self.settings.editing {
                    self.settings.editing = false;
                    self.settings.edit_buffer.clear();
                    self.input_mode = InputMode::Normal;
                } else if self.setup.editing {
                    self.setup.editing = false;
                    self.setup.edit_buffer.clear();
                    self.input_mode = InputMode::Normal;
                } else {
                    self.input_mode = InputMode::Normal;
                    self.search_query.clear();
                    if self.screen == Screen::History {
                        self.history_cursor = 0;
                    }
                }
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                self.expire_notice();
            }
            Action::Resize(_w, h) => {
                self.visible_rows = (h as usize).saturating_sub(5);
            }
            Action::None => {}
        }
        false
    }

    /// Handle Enter on the setup screen.
    fn handle_setup_enter(&mut self) {
        match self.setup.field {
            SetupField::Document => self.setup_cycle_document(1),
            SetupField::Count => self.setup.bump_count(1),
            SetupField::Kind => self.setup.kind = self.setup.kind.next(),
            SetupField::Mode => self.setup.mode = self.setup.mode.next(),
            SetupField::StyleReference => {
                self.setup.editing = true;
                self.setup.edit_buffer = self.setup.style_reference.clone();
                self.input_mode = InputMode::TextInput;
            }
            SetupField::Generate => self.start_generation(),
        }
    }

    /// Left/right adjustment of the current setup field.
    fn setup_adjust(&mut self, delta: i64) {
        match self.setup.field {
            SetupField::Document => self.setup_cycle_document(delta),
            SetupField::Count => self.setup.bump_count(delta),
            SetupField::Kind => self.setup.kind = self.setup.kind.next(),
            SetupField::Mode => self.setup.mode = self.setup.mode.next(),
            SetupField::StyleReference | SetupField::Generate => {}
        }
    }

    /// Cycle the selected document through the ready part of the library.
    fn setup_cycle_document(&mut self, delta: i64) {
        let ids = self.ready_doc_ids();
        if ids.is_empty() {
            self.setup.selected_doc = None;
            return;
        }
        let pos = self
            .setup
            .selected_doc
            .as_deref()
            .and_then(|id| ids.iter().position(|x| x == id))
            .unwrap_or(0) as i64;
        let next = (pos + delta).rem_euclid(ids.len() as i64) as usize;
        self.setup.selected_doc = Some(ids[next].clone());
    }

    /// Confirm the style reference edit.
    fn confirm_setup_edit(&mut self) {
        self.setup.style_reference = self.setup.edit_buffer.trim().to_string();
        self.setup.editing = false;
        self.setup.edit_buffer.clear();
        self.input_mode = InputMode::Normal;
    }
}
