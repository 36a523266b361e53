use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::model::settings::{SettingsSection, SettingsState};
use crate::theme::Theme;

/// Render the settings screen into the given area.
pub fn render_in(f: &mut Frame, app: &App, area: Rect, footer_area: Rect) {
    let theme = &app.theme;
    let settings = &app.settings;

    let [tabs_area, path_area, content_area] = Layout::vertical([
        Constraint::Length(1), // section tabs
        Constraint::Length(1), // config file path
        Constraint::Min(5),    // content
    ])
    .areas(area);

    // Section tabs
    let mut tab_spans: Vec<Span> = Vec::new();
    for section in SettingsSection::all() {
        let is_active = *section == settings.section;
        if is_active {
            tab_spans.push(Span::styled(
                format!(" [{}] ", section.label()),
                Style::default()
                    .fg(theme.header_fg)
                    .bg(theme.active)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            tab_spans.push(Span::styled(
                format!("  {}  ", section.label()),
                Style::default().fg(theme.dim),
            ));
        }
    }
    if settings.dirty {
        tab_spans.push(Span::styled(
            "  (unsaved changes)",
            Style::default().fg(theme.pending),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(tab_spans)), tabs_area);

    // Config file path hint
    let path_text = crate::config_file::config_path()
        .map(|p| format!("  Config: {}", p.display()))
        .unwrap_or_else(|| "  Config: (no config directory)".to_string());
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            path_text,
            Style::default().fg(theme.dim),
        ))),
        path_area,
    );

    // Content: only show the current section
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    match settings.section {
        SettingsSection::Api => render_api(&mut lines, settings, theme),
        SettingsSection::Generation => render_generation(&mut lines, settings, theme),
        SettingsSection::Display => render_display(&mut lines, settings, theme),
    }

    let content = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(content, content_area);

    render_footer(f, footer_area, app);
}

fn render_api(lines: &mut Vec<Line>, settings: &SettingsState, theme: &Theme) {
    let items = [
        ("API Key", SettingsState::mask_key(&settings.api_key)),
        ("Question Model", settings.question_model.clone()),
        ("Image Model", settings.image_model.clone()),
        ("Timeout (s)", settings.request_timeout_secs.to_string()),
    ];
    for (i, (label, value)) in items.iter().enumerate() {
        push_item(lines, settings, theme, i, label, value.clone());
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  The key can also come from --api-key or GEMINI_API_KEY",
        Style::default().fg(theme.dim),
    )));
}

fn render_generation(lines: &mut Vec<Line>, settings: &SettingsState, theme: &Theme) {
    let items = [
        ("Default Count", settings.default_count.to_string()),
        ("Default Type", settings.default_kind.label().to_string()),
        ("Default Mode", settings.default_mode.label().to_string()),
        ("Max Document (MB)", settings.max_document_mb.to_string()),
    ];
    for (i, (label, value)) in items.iter().enumerate() {
        push_item(lines, settings, theme, i, label, value.clone());
    }
}

fn render_display(lines: &mut Vec<Line>, settings: &SettingsState, theme: &Theme) {
    let cursor = if settings.item_cursor == 0 { "> " } else { "  " };
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {}{:<20}", cursor, "Theme"),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            settings.theme_name.clone(),
            Style::default().fg(theme.active),
        ),
        Span::styled("  (Enter to cycle)", Style::default().fg(theme.dim)),
    ]));
}

fn push_item(
    lines: &mut Vec<Line>,
    settings: &SettingsState,
    theme: &Theme,
    index: usize,
    label: &str,
    value: String,
) {
    let cursor = if settings.item_cursor == index {
        "> "
    } else {
        "  "
    };
    let editing_here = settings.editing && settings.item_cursor == index;
    let display_val = if editing_here {
        format!("{}\u{2588}", settings.edit_buffer)
    } else {
        value
    };
    let val_style = if editing_here {
        Style::default().fg(theme.active)
    } else {
        Style::default().fg(theme.dim)
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {}{:<20}", cursor, label),
            Style::default().fg(theme.text),
        ),
        Span::styled(display_val, val_style),
    ]));
}

fn render_footer(f: &mut Frame, footer_area: Rect, app: &App) {
    let theme = &app.theme;

    if let Some(notice) = &app.notice {
        crate::view::render_notice(f, footer_area, notice, theme);
        return;
    }

    let footer_text = if app.settings.editing {
        " Type value, Enter:confirm, Esc:cancel".to_string()
    } else {
        let section_hint = match app.settings.section {
            SettingsSection::Api => "Enter:edit value",
            SettingsSection::Generation => "Enter:edit  Space/\u{2190}\u{2192}:cycle",
            SettingsSection::Display => "Space/Enter:cycle theme",
        };
        format!(
            " j/k:navigate  Tab:section  {}  Ctrl+S:save  Esc:back",
            section_hint
        )
    };
    let footer = Line::from(Span::styled(footer_text, theme.footer_style()));
    f.render_widget(Paragraph::new(footer), footer_area);
}
