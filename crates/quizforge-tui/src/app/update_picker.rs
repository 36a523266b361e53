use super::{App, Screen};
use crate::action::Action;
use crate::model::run::today_stamp;
use crate::tui_event::BackendCommand;

use quizforge_core::Document;

impl App {
    /// Handle input while on the upload screen.
    pub(super) fn handle_upload_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::NavigateBack => {
                // Cancel: nothing selected so far is ingested, the library
                // stays as it was.
                self.picker.selected.clear();
                self.screen = Screen::Dashboard;
            }
            Action::MoveDown => {
                let max = self.picker.entries.len().saturating_sub(1);
                if self.picker.cursor < max {
                    self.picker.cursor += 1;
                }
            }
            Action::MoveUp => {
                self.picker.cursor = self.picker.cursor.saturating_sub(1);
            }
            Action::PageDown => {
                let page = self.visible_rows.max(1);
                let max = self.picker.entries.len().saturating_sub(1);
                self.picker.cursor = (self.picker.cursor + page).min(max);
            }
            Action::PageUp => {
                let page = self.visible_rows.max(1);
                self.picker.cursor = self.picker.cursor.saturating_sub(page);
            }
            Action::GoTop => {
                self.picker.cursor = 0;
            }
            Action::GoBottom => {
                self.picker.cursor = self.picker.entries.len().saturating_sub(1);
            }
            Action::ToggleSelect => {
                self.picker.toggle_selected();
            }
            Action::Confirm => {
                // Enter on a directory opens it, on a file toggles selection
                if !self.picker.enter_directory() {
                    self.picker.toggle_selected();
                }
            }
            Action::Continue => {
                if self.picker.selected.is_empty() {
                    self.notify_warn("No files selected");
                } else {
                    self.queue_ingest();
                    self.enter_setup(None);
                }
            }
            Action::ToggleHelp => {
                self.show_help = true;
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
    }

    /// Create pending library entries for the selected files and hand them
    /// to the backend for reading.
    pub(super) fn queue_ingest(&mut self) {
        let paths = std::mem::take(&mut self.picker.selected);
        let mut files = Vec::with_capacity(paths.len());

        for path in paths {
            let kind = match quizforge_ingest::detect_kind(&path) {
                Ok(kind) => kind,
                // Unsupported entries cannot be selected; a race with the
                // filesystem still lands here, so just skip the file.
                Err(_) => continue,
            };
            let name = quizforge_ingest::display_name(&path);
            let doc = Document::pending(name, kind, today_stamp());
            files.push((doc.id.clone(), path));
            self.documents.insert(0, doc);
        }

        if files.is_empty() {
            return;
        }

        self.doc_cursor = 0;
        let count = files.len();
        self.notify(format!(
            "Preparing {} file{}",
            count,
            if count == 1 { "" } else { "s" }
        ));

        if let Some(tx) = &self.backend_cmd_tx {
            let _ = tx.send(BackendCommand::IngestFiles {
                files,
                max_mb: self.settings.max_document_mb,
            });
        }
    }
}
