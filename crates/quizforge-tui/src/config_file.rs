use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use quizforge_core::{GenerationParams, QuestionKind, StudyMode};

use crate::model::settings::SettingsState;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api: Option<ApiConfig>,
    pub generation: Option<GenerationConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub api_key: Option<String>,
    pub question_model: Option<String>,
    pub image_model: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub default_count: Option<u32>,
    /// Wire name: `multiple_choice`, `true_false`, or `mixed`.
    pub default_kind: Option<String>,
    /// `practice` or `exam`.
    pub default_mode: Option<String>,
    pub max_document_mb: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

/// Platform config directory path: `<config_dir>/quizforge/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("quizforge").join("config.toml"))
}

/// Load config by cascading CWD `.quizforge.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".quizforge.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load config from an explicit path, falling back to the cascade when `None`.
pub fn load_config_from(path: Option<&Path>) -> ConfigFile {
    match path {
        Some(p) => load_from_path(p).unwrap_or_default(),
        None => load_config(),
    }
}

fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        api: Some(ApiConfig {
            api_key: overlay
                .api
                .as_ref()
                .and_then(|a| a.api_key.clone())
                .or_else(|| base.api.as_ref().and_then(|a| a.api_key.clone())),
            question_model: overlay
                .api
                .as_ref()
                .and_then(|a| a.question_model.clone())
                .or_else(|| base.api.as_ref().and_then(|a| a.question_model.clone())),
            image_model: overlay
                .api
                .as_ref()
                .and_then(|a| a.image_model.clone())
                .or_else(|| base.api.as_ref().and_then(|a| a.image_model.clone())),
            request_timeout_secs: overlay
                .api
                .as_ref()
                .and_then(|a| a.request_timeout_secs)
                .or_else(|| base.api.as_ref().and_then(|a| a.request_timeout_secs)),
        }),
        generation: Some(GenerationConfig {
            default_count: overlay
                .generation
                .as_ref()
                .and_then(|g| g.default_count)
                .or_else(|| base.generation.as_ref().and_then(|g| g.default_count)),
            default_kind: overlay
                .generation
                .as_ref()
                .and_then(|g| g.default_kind.clone())
                .or_else(|| base.generation.as_ref().and_then(|g| g.default_kind.clone())),
            default_mode: overlay
                .generation
                .as_ref()
                .and_then(|g| g.default_mode.clone())
                .or_else(|| base.generation.as_ref().and_then(|g| g.default_mode.clone())),
            max_document_mb: overlay
                .generation
                .as_ref()
                .and_then(|g| g.max_document_mb)
                .or_else(|| base.generation.as_ref().and_then(|g| g.max_document_mb)),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
        }),
    }
}

/// Save the current config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, String> {
    let path = config_path().ok_or_else(|| "Could not determine config directory".to_string())?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(&path, content).map_err(|e| format!("Failed to write config: {}", e))?;
    Ok(path)
}

/// Convert a `ConfigFile` into partial fills on a `SettingsState`.
/// Only sets values that are `Some` in the file config (doesn't overwrite with defaults).
pub fn apply_to_settings(file_cfg: &ConfigFile, state: &mut SettingsState) {
    if let Some(api) = &file_cfg.api {
        if let Some(ref key) = api.api_key {
            if !key.is_empty() {
                state.api_key = key.clone();
            }
        }
        if let Some(ref model) = api.question_model {
            if !model.is_empty() {
                state.question_model = model.clone();
            }
        }
        if let Some(ref model) = api.image_model {
            if !model.is_empty() {
                state.image_model = model.clone();
            }
        }
        if let Some(v) = api.request_timeout_secs {
            state.request_timeout_secs = v.max(1);
        }
    }
    if let Some(generation) = &file_cfg.generation {
        if let Some(v) = generation.default_count {
            state.default_count = GenerationParams::clamp_count(v);
        }
        if let Some(ref kind) = generation.default_kind {
            if let Some(parsed) = QuestionKind::from_wire(kind) {
                state.default_kind = parsed;
            }
        }
        if let Some(ref mode) = generation.default_mode {
            if mode.eq_ignore_ascii_case("practice") {
                state.default_mode = StudyMode::Practice;
            } else if mode.eq_ignore_ascii_case("exam") {
                state.default_mode = StudyMode::Exam;
            }
        }
        if let Some(v) = generation.max_document_mb {
            state.max_document_mb = v.max(1);
        }
    }
    if let Some(disp) = &file_cfg.display {
        if let Some(ref theme) = disp.theme {
            if !theme.is_empty() {
                state.theme_name = theme.clone();
            }
        }
    }
}

/// Convert a `SettingsState` into a `ConfigFile` for saving.
pub fn from_settings(state: &SettingsState) -> ConfigFile {
    ConfigFile {
        api: Some(ApiConfig {
            api_key: if state.api_key.is_empty() {
                None
            } else {
                Some(state.api_key.clone())
            },
            question_model: if state.question_model.is_empty() {
                None
            } else {
                Some(state.question_model.clone())
            },
            image_model: if state.image_model.is_empty() {
                None
            } else {
                Some(state.image_model.clone())
            },
            request_timeout_secs: Some(state.request_timeout_secs),
        }),
        generation: Some(GenerationConfig {
            default_count: Some(state.default_count),
            default_kind: Some(state.default_kind.wire().to_string()),
            default_mode: Some(state.default_mode.label().to_lowercase()),
            max_document_mb: Some(state.max_document_mb),
        }),
        display: Some(DisplayConfig {
            theme: Some(state.theme_name.clone()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_round_trip_toml() {
        let config = ConfigFile {
            api: Some(ApiConfig {
                api_key: Some("abc123".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api.unwrap().api_key.unwrap(), "abc123");
    }

    #[test]
    fn absent_fields_deserialize_as_none() {
        let toml_str = "[generation]\ndefault_count = 20\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        let generation = parsed.generation.unwrap();
        assert_eq!(generation.default_count, Some(20));
        assert!(generation.default_kind.is_none());
        assert!(parsed.api.is_none());
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            display: Some(DisplayConfig {
                theme: Some("hacker".to_string()),
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            display: Some(DisplayConfig {
                theme: Some("modern".to_string()),
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        assert_eq!(merged.display.unwrap().theme.unwrap(), "modern");
    }

    #[test]
    fn merge_keeps_base_when_overlay_absent() {
        let base = ConfigFile {
            api: Some(ApiConfig {
                question_model: Some("gemini-3-pro-preview".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(
            merged.api.unwrap().question_model.unwrap(),
            "gemini-3-pro-preview"
        );
    }

    #[test]
    fn apply_clamps_and_parses_wire_names() {
        let file_cfg = ConfigFile {
            generation: Some(GenerationConfig {
                default_count: Some(500),
                default_kind: Some("true_false".to_string()),
                default_mode: Some("exam".to_string()),
                max_document_mb: Some(0),
            }),
            ..Default::default()
        };
        let mut state = SettingsState::default();
        apply_to_settings(&file_cfg, &mut state);

        assert_eq!(state.default_count, 50);
        assert_eq!(state.default_kind, QuestionKind::TrueFalse);
        assert_eq!(state.default_mode, StudyMode::Exam);
        assert_eq!(state.max_document_mb, 1);
    }

    #[test]
    fn apply_ignores_unknown_wire_names() {
        let file_cfg = ConfigFile {
            generation: Some(GenerationConfig {
                default_kind: Some("essay".to_string()),
                default_mode: Some("marathon".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut state = SettingsState::default();
        apply_to_settings(&file_cfg, &mut state);

        assert_eq!(state.default_kind, QuestionKind::MultipleChoice);
        assert_eq!(state.default_mode, StudyMode::Practice);
    }

    #[test]
    fn settings_round_trip_through_file_form() {
        let mut state = SettingsState::default();
        state.api_key = "key".to_string();
        state.default_count = 25;
        state.default_mode = StudyMode::Exam;
        state.theme_name = "modern".to_string();

        let mut restored = SettingsState::default();
        apply_to_settings(&from_settings(&state), &mut restored);

        assert_eq!(restored.api_key, "key");
        assert_eq!(restored.default_count, 25);
        assert_eq!(restored.default_mode, StudyMode::Exam);
        assert_eq!(restored.theme_name, "modern");
    }
}
