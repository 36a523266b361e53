use super::App;
use crate::tui_event::BackendCommand;

impl App {
    /// Kick off quiz generation for the document selected on the setup screen.
    ///
    /// Validation happens here, synchronously: with no usable document there
    /// is nothing to send and the screen does not change.
    pub(super) fn start_generation(&mut self) {
        if self.generating {
            return;
        }

        let document = self
            .setup
            .selected_doc
            .as_deref()
            .and_then(|id| self.document_by_id(id))
            .filter(|d| d.is_ready())
            .cloned();
        let Some(document) = document else {
            self.notify_warn("Select a document with stored content first");
            return;
        };

        let params = self.setup.params();
        let config = self.settings.gateway_config();

        self.generating = true;
        self.generation_phase = None;

        if let Some(tx) = &self.backend_cmd_tx {
            let _ = tx.send(BackendCommand::GenerateSession {
                document,
                params,
                config,
            });
        }
    }
}
