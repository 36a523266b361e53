use super::{App, InputMode, Screen};
use crate::model::settings::SettingsSection;
use crate::theme::Theme;

use quizforge_core::GenerationParams;

/// Themes cycled by the Display section, in order.
const THEME_NAMES: &[&str] = &["hacker", "modern"];

impl App {
    /// Handle Enter on the settings screen (start editing or cycle a value).
    pub(super) fn handle_settings_enter(&mut self) {
        match self.settings.section {
            SettingsSection::Api => {
                let value = match self.settings.item_cursor {
                    0 => self.settings.api_key.clone(),
                    1 => self.settings.question_model.clone(),
                    2 => self.settings.image_model.clone(),
                    3 => self.settings.request_timeout_secs.to_string(),
                    _ => return,
                };
                self.settings.editing = true;
                self.settings.edit_buffer = value;
                self.input_mode = InputMode::TextInput;
            }
            SettingsSection::Generation => match self.settings.item_cursor {
                0 => {
                    self.settings.editing = true;
                    self.settings.edit_buffer = self.settings.default_count.to_string();
                    self.input_mode = InputMode::TextInput;
                }
                1 => {
                    self.settings.default_kind = self.settings.default_kind.next();
                    self.settings.dirty = true;
                }
                2 => {
                    self.settings.default_mode = self.settings.default_mode.next();
                    self.settings.dirty = true;
                }
                3 => {
                    self.settings.editing = true;
                    self.settings.edit_buffer = self.settings.max_document_mb.to_string();
                    self.input_mode = InputMode::TextInput;
                }
                _ => {}
            },
            SettingsSection::Display => {
                if self.settings.item_cursor == 0 {
                    self.cycle_theme();
                }
            }
        }
    }

    /// Handle Space on the settings screen (cycle enum-valued items).
    pub(super) fn handle_settings_space(&mut self) {
        match self.settings.section {
            SettingsSection::Generation => match self.settings.item_cursor {
                1 => {
                    self.settings.default_kind = self.settings.default_kind.next();
                    self.settings.dirty = true;
                }
                2 => {
                    self.settings.default_mode = self.settings.default_mode.next();
                    self.settings.dirty = true;
                }
                _ => {}
            },
            SettingsSection::Display => {
                if self.settings.item_cursor == 0 {
                    self.cycle_theme();
                }
            }
            SettingsSection::Api => {}
        }
    }

    /// Left/right adjustment of the current settings item.
    pub(super) fn settings_adjust(&mut self, delta: i64) {
        match self.settings.section {
            SettingsSection::Api => {
                if self.settings.item_cursor == 3 {
                    let next = self.settings.request_timeout_secs as i64 + delta * 5;
                    self.settings.request_timeout_secs = next.max(1) as u64;
                    self.settings.dirty = true;
                }
            }
            SettingsSection::Generation => match self.settings.item_cursor {
                0 => {
                    let next = self.settings.default_count as i64 + delta;
                    self.settings.default_count = GenerationParams::clamp_count(next.max(0) as u32);
                    self.settings.dirty = true;
                }
                1 => {
                    self.settings.default_kind = self.settings.default_kind.next();
                    self.settings.dirty = true;
                }
                2 => {
                    self.settings.default_mode = self.settings.default_mode.next();
                    self.settings.dirty = true;
                }
                3 => {
                    let next = self.settings.max_document_mb as i64 + delta;
                    self.settings.max_document_mb = next.max(1) as u64;
                    self.settings.dirty = true;
                }
                _ => {}
            },
            SettingsSection::Display => {
                if self.settings.item_cursor == 0 {
                    self.cycle_theme();
                }
            }
        }
    }

    /// Confirm a settings text edit.
    pub(super) fn confirm_settings_edit(&mut self) {
        let buf = self.settings.edit_buffer.trim().to_string();
        match self.settings.section {
            SettingsSection::Api => match self.settings.item_cursor {
                0 => self.settings.api_key = buf,
                1 => self.settings.question_model = buf,
                2 => self.settings.image_model = buf,
                3 => {
                    if let Ok(v) = buf.parse::<u64>() {
                        self.settings.request_timeout_secs = v.max(1);
                    }
                }
                _ => {}
            },
            SettingsSection::Generation => match self.settings.item_cursor {
                0 => {
                    if let Ok(v) = buf.parse::<u32>() {
                        self.settings.default_count = GenerationParams::clamp_count(v);
                    }
                }
                3 => {
                    if let Ok(v) = buf.parse::<u64>() {
                        self.settings.max_document_mb = v.max(1);
                    }
                }
                _ => {}
            },
            SettingsSection::Display => {}
        }
        self.settings.dirty = true;
        self.settings.editing = false;
        self.settings.edit_buffer.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Advance the theme and apply it immediately so the change is visible
    /// before saving.
    pub(super) fn cycle_theme(&mut self) {
        let pos = THEME_NAMES
            .iter()
            .position(|n| *n == self.settings.theme_name)
            .unwrap_or(0);
        let next = THEME_NAMES[(pos + 1) % THEME_NAMES.len()];
        self.settings.theme_name = next.to_string();
        self.theme = Theme::from_name(next);
        self.settings.dirty = true;
    }

    /// Save settings to disk and clear the dirty flag.
    pub(super) fn save_settings(&mut self) {
        let file_cfg = crate::config_file::from_settings(&self.settings);
        match crate::config_file::save_config(&file_cfg) {
            Ok(path) => {
                self.settings.dirty = false;
                self.notify(format!("Settings saved to {}", path.display()));
            }
            Err(e) => {
                self.notify_warn(format!("Settings save failed: {}", e));
            }
        }
    }

    /// Return to the screen settings was opened from.
    pub(super) fn leave_settings(&mut self) {
        self.theme = Theme::from_name(&self.settings.theme_name);
        self.screen = self.settings.prev_screen.take().unwrap_or(Screen::Dashboard);
    }
}
