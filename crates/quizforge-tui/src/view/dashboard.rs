use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use quizforge_core::DocumentStatus;

use crate::app::{App, DashboardPane};
use crate::view::{format_elapsed, spinner_char, truncate};

/// Render the dashboard: document library on the left, recent quizzes on
/// the right.
pub fn render_in(f: &mut Frame, app: &App, area: Rect, footer_area: Rect) {
    let [docs_area, recent_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    render_documents(f, docs_area, app);
    render_recent(f, recent_area, app);
    render_footer(f, footer_area, app);
}

fn pane_border_style(app: &App, pane: DashboardPane) -> Style {
    if app.dash_pane == pane {
        Style::default().fg(app.theme.active)
    } else {
        app.theme.border_style()
    }
}

fn render_documents(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(app, DashboardPane::Documents))
        .title(" Documents ");

    if app.documents.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No documents yet",
                Style::default().fg(theme.dim),
            )),
            Line::from(Span::styled(
                "  Press o to add files",
                Style::default().fg(theme.dim),
            )),
        ])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(["Name", "Size", "Uploaded", "Status"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
    }))
    .height(1);

    let name_width = (area.width as usize).saturating_sub(32);
    let rows: Vec<Row> = app
        .documents
        .iter()
        .map(|doc| {
            let status_text = match doc.status {
                DocumentStatus::Pending => {
                    format!("{} {}", spinner_char(app.tick), doc.status.label())
                }
                _ => doc.status.label().to_string(),
            };
            let status_style = Style::default().fg(theme.document_status_color(doc.status));
            let size = if doc.size_label.is_empty() {
                "\u{2014}".to_string()
            } else {
                doc.size_label.clone()
            };
            Row::new(vec![
                Cell::from(truncate(&doc.name, name_width))
                    .style(Style::default().fg(theme.text)),
                Cell::from(size).style(Style::default().fg(theme.dim)),
                Cell::from(doc.uploaded_at.clone()).style(Style::default().fg(theme.dim)),
                Cell::from(status_text).style(status_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Length(9),
        Constraint::Length(11),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    if app.dash_pane == DashboardPane::Documents {
        state.select(Some(app.doc_cursor.min(app.documents.len() - 1)));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn render_recent(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(app, DashboardPane::Recent))
        .title(" Recent Quizzes ");

    if app.sessions.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No quizzes taken yet",
                Style::default().fg(theme.dim),
            )),
            Line::from(Span::styled(
                "  Select a ready document and press Enter",
                Style::default().fg(theme.dim),
            )),
        ])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(["Quiz", "Date", "Score", "Time"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
    }))
    .height(1);

    let title_width = (area.width as usize).saturating_sub(28);
    let rows: Vec<Row> = app
        .sessions
        .iter()
        .map(|session| {
            let pct = session.percentage();
            let score = format!("{}/{} ({}%)", session.score, session.total_questions, pct);
            let time = session
                .time_elapsed
                .map(format_elapsed)
                .unwrap_or_else(|| "\u{2014}".to_string());
            Row::new(vec![
                Cell::from(truncate(&session.title, title_width))
                    .style(Style::default().fg(theme.text)),
                Cell::from(session.date.clone()).style(Style::default().fg(theme.dim)),
                Cell::from(score).style(Style::default().fg(theme.score_color(pct))),
                Cell::from(time).style(Style::default().fg(theme.dim)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(10),
        Constraint::Length(11),
        Constraint::Length(12),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    if app.dash_pane == DashboardPane::Recent {
        state.select(Some(app.recent_cursor.min(app.sessions.len() - 1)));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn render_footer(f: &mut Frame, footer_area: Rect, app: &App) {
    let theme = &app.theme;

    if let Some(notice) = &app.notice {
        crate::view::render_notice(f, footer_area, notice, theme);
        return;
    }

    let hint = match app.dash_pane {
        DashboardPane::Documents => {
            " Enter:new quiz  Tab:pane  o:add files  h:history  ,:settings  ?:help  q:quit"
        }
        DashboardPane::Recent => {
            " Enter:view results  Tab:pane  o:add files  h:history  ,:settings  ?:help  q:quit"
        }
    };
    let footer = Line::from(Span::styled(hint, theme.footer_style()));
    f.render_widget(Paragraph::new(footer), footer_area);
}
