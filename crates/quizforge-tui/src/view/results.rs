use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};

use quizforge_core::{Question, QuizSession};

use crate::app::App;
use crate::theme::Theme;
use crate::view::{format_elapsed, truncate};

/// Render the results screen: score summary, per-question review, and the
/// selected question's detail.
pub fn render_in(f: &mut Frame, app: &App, area: Rect, footer_area: Rect) {
    let theme = &app.theme;
    let Some(session) = app.current_results() else {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "  No results to show",
                Style::default().fg(theme.dim),
            ))),
            area,
        );
        return;
    };

    let [summary_area, review_area, detail_area] = Layout::vertical([
        Constraint::Length(7),
        Constraint::Min(5),
        Constraint::Length(8),
    ])
    .areas(area);

    render_summary(f, summary_area, session, theme);
    render_review(f, review_area, session, app.review_cursor, theme);
    if let Some(question) = session.questions.get(app.review_cursor) {
        render_detail(f, detail_area, question, theme);
    }
    render_footer(f, footer_area, app);
}

fn render_summary(f: &mut Frame, area: Rect, session: &QuizSession, theme: &Theme) {
    let pct = session.percentage();
    let time = session
        .time_elapsed
        .map(format_elapsed)
        .unwrap_or_else(|| "\u{2014}".to_string());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("  Score:   ", Style::default().fg(theme.dim)),
            Span::styled(
                format!("{}/{} ({}%)", session.score, session.total_questions, pct),
                Style::default()
                    .fg(theme.score_color(pct))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Mode:    ", Style::default().fg(theme.dim)),
            Span::styled(session.mode.label(), Style::default().fg(theme.text)),
            Span::styled(
                format!("   {}   {}", session.date, time),
                Style::default().fg(theme.dim),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Topic:   ", Style::default().fg(theme.dim)),
            Span::styled(session.topic.clone(), Style::default().fg(theme.text)),
        ]),
    ];

    if let Some(cover) = &session.cover_image {
        lines.push(Line::from(vec![
            Span::styled("  Cover:   ", Style::default().fg(theme.dim)),
            Span::styled(
                format!("{} ({})", cover.style, cover.mime),
                Style::default().fg(theme.active),
            ),
        ]));
    }

    let summary = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(format!(" {} ", session.title)),
    );
    f.render_widget(summary, area);
}

fn render_review(f: &mut Frame, area: Rect, session: &QuizSession, cursor: usize, theme: &Theme) {
    let header = Row::new(["", "Question", "Your answer", "Correct answer"].iter().map(
        |h| Cell::from(*h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
    ))
    .height(1);

    let col_width = ((area.width as usize).saturating_sub(8)) / 3;
    let rows: Vec<Row> = session
        .questions
        .iter()
        .map(|q| {
            let (mark, mark_style) = match q.is_correct {
                Some(true) => ("\u{2713}", Style::default().fg(theme.correct)),
                Some(false) => ("\u{2717}", Style::default().fg(theme.incorrect)),
                None => ("\u{2014}", Style::default().fg(theme.dim)),
            };
            let answer = q.user_answer.as_deref().unwrap_or("(unanswered)");
            Row::new(vec![
                Cell::from(mark).style(mark_style.add_modifier(Modifier::BOLD)),
                Cell::from(truncate(&q.text, col_width)).style(Style::default().fg(theme.text)),
                Cell::from(truncate(answer, col_width)).style(mark_style),
                Cell::from(truncate(&q.correct_answer, col_width))
                    .style(Style::default().fg(theme.dim)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Min(15),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Review "),
        )
        .row_highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    if !session.questions.is_empty() {
        state.select(Some(cursor.min(session.questions.len() - 1)));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn render_detail(f: &mut Frame, area: Rect, question: &Question, theme: &Theme) {
    let answer = question.user_answer.as_deref().unwrap_or("(unanswered)");
    let answer_style = match question.is_correct {
        Some(true) => Style::default().fg(theme.correct),
        Some(false) => Style::default().fg(theme.incorrect),
        None => Style::default().fg(theme.dim),
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("  {}", question.text),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  Your answer:    ", Style::default().fg(theme.dim)),
            Span::styled(answer.to_string(), answer_style),
        ]),
        Line::from(vec![
            Span::styled("  Correct answer: ", Style::default().fg(theme.dim)),
            Span::styled(
                question.correct_answer.clone(),
                Style::default().fg(theme.correct),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", question.explanation),
            Style::default().fg(theme.dim),
        )),
    ];

    let detail = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Explanation "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(detail, area);
}

fn render_footer(f: &mut Frame, footer_area: Rect, app: &App) {
    let theme = &app.theme;

    if let Some(notice) = &app.notice {
        crate::view::render_notice(f, footer_area, notice, theme);
        return;
    }

    let footer = Line::from(Span::styled(
        " j/k:review  r:retake  c:new quiz  h:history  o:add files  Esc:dashboard  q:quit",
        theme.footer_style(),
    ));
    f.render_widget(Paragraph::new(footer), footer_area);
}
