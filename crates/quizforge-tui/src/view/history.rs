use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::app::{App, InputMode};
use crate::model::history::{average_pct, filtered_indices};
use crate::theme::Theme;
use crate::view::{format_elapsed, truncate};

/// Render the session history screen.
pub fn render_in(f: &mut Frame, app: &App, area: Rect, footer_area: Rect) {
    let theme = &app.theme;
    let has_search = app.input_mode == InputMode::Search || !app.search_query.is_empty();

    let mut constraints = vec![Constraint::Length(1)]; // stats line
    if has_search {
        constraints.push(Constraint::Length(1)); // search bar
    }
    constraints.push(Constraint::Min(5)); // table

    let chunks = Layout::vertical(constraints).split(area);
    let mut chunk_idx = 0;

    render_stats(f, chunks[chunk_idx], app, theme);
    chunk_idx += 1;

    if has_search {
        render_search_bar(f, chunks[chunk_idx], app, theme);
        chunk_idx += 1;
    }

    render_table(f, chunks[chunk_idx], app, theme);
    render_footer(f, footer_area, app);
}

fn render_stats(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let indices = filtered_indices(&app.sessions, &app.search_query);
    let mut spans = vec![Span::styled(
        format!(" {} session{}", indices.len(), if indices.len() == 1 { "" } else { "s" }),
        Style::default().fg(theme.text),
    )];
    if !app.search_query.is_empty() {
        spans.push(Span::styled(
            format!(" (of {})", app.sessions.len()),
            Style::default().fg(theme.dim),
        ));
    }
    if let Some(avg) = average_pct(&app.sessions) {
        spans.push(Span::styled(
            format!("   average {}%", avg),
            Style::default().fg(theme.score_color(avg)),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_search_bar(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let cursor = if app.input_mode == InputMode::Search {
        "\u{2588}"
    } else {
        ""
    };
    let line = Line::from(vec![
        Span::styled(
            " /",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(&app.search_query, Style::default().fg(theme.text)),
        Span::styled(cursor, Style::default().fg(theme.active)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let indices = filtered_indices(&app.sessions, &app.search_query);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" History ");

    if indices.is_empty() {
        let text = if app.sessions.is_empty() {
            "  No quizzes taken yet"
        } else {
            "  No sessions match the search"
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(text, Style::default().fg(theme.dim))),
        ])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(["Quiz", "Topic", "Date", "Mode", "Score", "Time"].iter().map(
        |h| Cell::from(*h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
    ))
    .height(1);

    let title_width = (area.width as usize).saturating_sub(52).max(10);
    let rows: Vec<Row> = indices
        .iter()
        .map(|&idx| {
            let session = &app.sessions[idx];
            let pct = session.percentage();
            let time = session
                .time_elapsed
                .map(format_elapsed)
                .unwrap_or_else(|| "\u{2014}".to_string());
            Row::new(vec![
                Cell::from(truncate(&session.title, title_width))
                    .style(Style::default().fg(theme.text)),
                Cell::from(truncate(&session.topic, 16)).style(Style::default().fg(theme.dim)),
                Cell::from(session.date.clone()).style(Style::default().fg(theme.dim)),
                Cell::from(session.mode.label()).style(Style::default().fg(theme.text)),
                Cell::from(format!(
                    "{}/{} ({}%)",
                    session.score, session.total_questions, pct
                ))
                .style(Style::default().fg(theme.score_color(pct))),
                Cell::from(time).style(Style::default().fg(theme.dim)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(10),
        Constraint::Length(16),
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    state.select(Some(app.history_cursor.min(indices.len() - 1)));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_footer(f: &mut Frame, footer_area: Rect, app: &App) {
    let theme = &app.theme;

    if let Some(notice) = &app.notice {
        crate::view::render_notice(f, footer_area, notice, theme);
        return;
    }

    let footer_text = if app.input_mode == InputMode::Search {
        " Type to filter, Enter:confirm, Esc:clear"
    } else {
        " j/k:navigate  Enter:view results  r:retake  /:search  Esc:back  ?:help  q:quit"
    };
    let footer = Line::from(Span::styled(footer_text, theme.footer_style()));
    f.render_widget(Paragraph::new(footer), footer_area);
}
