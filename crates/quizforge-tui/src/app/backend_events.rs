use super::{App, Screen};
use crate::tui_event::BackendEvent;

use quizforge_core::DocumentStatus;

impl App {
    /// Apply an event from the backend task to the app state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::IngestComplete { document_id, file } => {
                if let Some(doc) = self.documents.iter_mut().find(|d| d.id == document_id) {
                    doc.kind = file.kind;
                    doc.size_bytes = file.size_bytes;
                    doc.size_label = file.size_label;
                    doc.payload = Some(file.payload);
                    doc.status = DocumentStatus::Ready;

                    let name = doc.name.clone();
                    self.notify(format!("'{}' is ready", name));
                }
                // If the user is already on setup waiting for this file,
                // select it.
                if self.screen == Screen::Config && self.setup.selected_doc.is_none() {
                    self.setup.selected_doc = Some(document_id);
                }
            }
            BackendEvent::IngestFailed { document_id, error } => {
                if let Some(doc) = self.documents.iter_mut().find(|d| d.id == document_id) {
                    doc.status = DocumentStatus::Error;
                    let name = doc.name.clone();
                    self.notify_warn(format!("'{}': {}", name, error));
                }
            }
            BackendEvent::PhaseChanged { phase } => {
                self.generation_phase = Some(phase);
            }
            BackendEvent::SessionReady { session } => {
                self.generating = false;
                self.generation_phase = None;
                self.begin_run(session);
            }
            BackendEvent::GenerationFailed { error } => {
                // Stay on setup so the user can adjust and retry.
                self.generating = false;
                self.generation_phase = None;
                self.notify_warn(format!("Generation failed: {}", error));
            }
        }
    }
}
