use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use quizforge_core::DocumentStatus;

use crate::app::App;
use crate::model::setup::SetupField;
use crate::theme::Theme;
use crate::view::spinner_char;

const FIELDS: &[SetupField] = &[
    SetupField::Document,
    SetupField::Count,
    SetupField::Kind,
    SetupField::Mode,
    SetupField::StyleReference,
    SetupField::Generate,
];

/// Render the quiz setup screen into the given area.
pub fn render_in(f: &mut Frame, app: &App, area: Rect, footer_area: Rect) {
    let theme = &app.theme;
    let setup = &app.setup;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    for field in FIELDS {
        let is_current = setup.field == *field && !app.generating;
        let cursor = if is_current { "> " } else { "  " };

        match field {
            SetupField::Generate => {
                lines.push(Line::from(""));
                let label = if app.generating {
                    format!(
                        "  {}[ {} Generating... ]",
                        cursor,
                        spinner_char(app.tick)
                    )
                } else {
                    format!("  {}[ Generate quiz ]", cursor)
                };
                let style = if app.generating {
                    Style::default().fg(theme.spinner).add_modifier(Modifier::BOLD)
                } else if is_current {
                    Style::default()
                        .fg(theme.header_fg)
                        .bg(theme.active)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                lines.push(Line::from(Span::styled(label, style)));
            }
            SetupField::StyleReference => {
                let display_val = if setup.editing && is_current {
                    format!("{}\u{2588}", setup.edit_buffer)
                } else if setup.style_reference.is_empty() {
                    "(none \u{2014} questions mimic this sample's phrasing)".to_string()
                } else {
                    setup.style_reference.clone()
                };
                let val_style = if setup.editing && is_current {
                    Style::default().fg(theme.active)
                } else {
                    Style::default().fg(theme.dim)
                };
                lines.push(field_line(cursor, field.label(), display_val, val_style, theme));
            }
            SetupField::Document => {
                let (display_val, val_style) = document_value(app, theme);
                lines.push(field_line(cursor, field.label(), display_val, val_style, theme));
            }
            SetupField::Count => {
                lines.push(field_line(
                    cursor,
                    field.label(),
                    setup.count.to_string(),
                    Style::default().fg(theme.active),
                    theme,
                ));
            }
            SetupField::Kind => {
                lines.push(field_line(
                    cursor,
                    field.label(),
                    setup.kind.label().to_string(),
                    Style::default().fg(theme.active),
                    theme,
                ));
            }
            SetupField::Mode => {
                lines.push(field_line(
                    cursor,
                    field.label(),
                    setup.mode.label().to_string(),
                    Style::default().fg(theme.active),
                    theme,
                ));
            }
        }
    }

    if app.generating {
        lines.push(Line::from(""));
        let phase_label = app
            .generation_phase
            .map(|p| p.label())
            .unwrap_or("Contacting model");
        lines.push(Line::from(Span::styled(
            format!("  {} {}...", spinner_char(app.tick), phase_label),
            Style::default()
                .fg(theme.spinner)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let content = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" New Quiz "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(content, area);

    render_footer(f, footer_area, app);
}

/// The value text and style for the document field, covering the empty and
/// still-ingesting cases.
fn document_value(app: &App, theme: &Theme) -> (String, Style) {
    let setup = &app.setup;
    match setup.selected_doc.as_deref().and_then(|id| app.document_by_id(id)) {
        Some(doc) => {
            let ready = app.ready_doc_ids();
            let pos = ready
                .iter()
                .position(|id| id == &doc.id)
                .map(|i| format!(" ({}/{})", i + 1, ready.len()))
                .unwrap_or_default();
            (
                format!("{}{}", doc.name, pos),
                Style::default().fg(theme.active),
            )
        }
        None => {
            let pending = app
                .documents
                .iter()
                .filter(|d| d.status == DocumentStatus::Pending)
                .count();
            if pending > 0 {
                (
                    format!(
                        "{} preparing {} file{}...",
                        spinner_char(app.tick),
                        pending,
                        if pending == 1 { "" } else { "s" }
                    ),
                    Style::default().fg(theme.pending),
                )
            } else {
                (
                    "(no ready documents \u{2014} press o to add files)".to_string(),
                    Style::default().fg(theme.dim),
                )
            }
        }
    }
}

fn field_line<'a>(
    cursor: &'a str,
    label: &'a str,
    value: String,
    val_style: Style,
    theme: &Theme,
) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("  {}{:<18}", cursor, label),
            Style::default().fg(theme.text),
        ),
        Span::styled(value, val_style),
    ])
}

fn render_footer(f: &mut Frame, footer_area: Rect, app: &App) {
    let theme = &app.theme;

    if let Some(notice) = &app.notice {
        crate::view::render_notice(f, footer_area, notice, theme);
        return;
    }

    let footer_text = if app.generating {
        " Generating... q:quit".to_string()
    } else if app.setup.editing {
        " Type a sample question, Enter:confirm, Esc:cancel".to_string()
    } else {
        let field_hint = match app.setup.field {
            SetupField::Document => "Enter/\u{2190}\u{2192}:cycle document",
            SetupField::Count => "Enter/\u{2190}\u{2192}:adjust count",
            SetupField::Kind | SetupField::Mode => "Enter/\u{2190}\u{2192}:cycle",
            SetupField::StyleReference => "Enter:edit",
            SetupField::Generate => "Enter:generate",
        };
        format!(
            " j/k:field  {}  r:generate  o:add files  Esc:back  ?:help  q:quit",
            field_hint
        )
    };
    let footer = Line::from(Span::styled(footer_text, theme.footer_style()));
    f.render_widget(Paragraph::new(footer), footer_area);
}
