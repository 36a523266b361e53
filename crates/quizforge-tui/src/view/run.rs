use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use quizforge_core::StudyMode;

use crate::app::App;
use crate::model::run::ActiveRun;
use crate::theme::Theme;
use crate::view::format_elapsed;

/// Render the active quiz screen (practice and exam share the layout).
pub fn render_in(f: &mut Frame, app: &App, area: Rect, footer_area: Rect) {
    let theme = &app.theme;
    let Some(run) = app.run.as_ref() else {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "  No quiz in progress",
                Style::default().fg(theme.dim),
            ))),
            area,
        );
        return;
    };

    let [progress_area, question_area, options_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Min(5),
    ])
    .areas(area);

    render_progress(f, progress_area, run, theme);
    render_question(f, question_area, run, theme);
    render_options(f, options_area, run, theme);
    render_footer(f, footer_area, app, run);
}

fn render_progress(f: &mut Frame, area: Rect, run: &ActiveRun, theme: &Theme) {
    let total = run.session.questions.len();
    let answered = run.session.answered_count();
    let position = format!(" Question {}/{} ", run.current + 1, total);
    let elapsed_str = format_elapsed(run.elapsed_secs());

    let non_bar = position.len() + elapsed_str.len() + 1;
    let bar_width = (area.width as usize).saturating_sub(non_bar);
    let filled = if total > 0 {
        (answered as f64 / total as f64 * bar_width as f64) as usize
    } else {
        0
    };
    let empty = bar_width.saturating_sub(filled);
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(empty);

    let spans = vec![
        Span::styled(
            position,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(bar, Style::default().fg(theme.active)),
        Span::styled(format!(" {}", elapsed_str), Style::default().fg(theme.dim)),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_question(f: &mut Frame, area: Rect, run: &ActiveRun, theme: &Theme) {
    let text = run
        .current_question()
        .map(|q| q.text.clone())
        .unwrap_or_default();

    let question = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(format!(" {} ", run.session.mode.label())),
    )
    .wrap(Wrap { trim: false });
    f.render_widget(question, area);
}

fn render_options(f: &mut Frame, area: Rect, run: &ActiveRun, theme: &Theme) {
    let Some(question) = run.current_question() else {
        return;
    };
    let answered = question.is_answered();

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    for (i, option) in question.options.iter().enumerate() {
        let is_cursor = !answered && run.option_cursor == i;
        let cursor = if is_cursor { "> " } else { "  " };
        let is_chosen = question.user_answer.as_deref() == Some(option.as_str());
        let is_correct_opt = question.correct_answer == *option;

        let (marker, style) = if run.revealed {
            // Practice feedback: the right answer and a wrong pick get verdicts
            if is_correct_opt {
                (
                    "\u{2713} ",
                    Style::default()
                        .fg(theme.correct)
                        .add_modifier(Modifier::BOLD),
                )
            } else if is_chosen {
                (
                    "\u{2717} ",
                    Style::default()
                        .fg(theme.incorrect)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(theme.dim))
            }
        } else if is_chosen {
            // Exam mode: show the pick without a verdict
            (
                "\u{25CF} ",
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::BOLD),
            )
        } else if is_cursor {
            ("  ", Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default().fg(theme.text))
        };

        let mut line_style = style;
        if is_cursor {
            line_style = line_style.bg(theme.highlight_bg);
        }
        lines.push(Line::from(Span::styled(
            format!("  {}{}{}. {}", cursor, marker, i + 1, option),
            line_style,
        )));
    }

    if run.revealed {
        lines.push(Line::from(""));
        let verdict = if question.is_correct == Some(true) {
            Span::styled(
                "  \u{2713} Correct",
                Style::default()
                    .fg(theme.correct)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "  \u{2717} Incorrect",
                Style::default()
                    .fg(theme.incorrect)
                    .add_modifier(Modifier::BOLD),
            )
        };
        lines.push(Line::from(verdict));
        if !question.explanation.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {}", question.explanation),
                Style::default().fg(theme.dim),
            )));
        }
    }

    let options = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Options "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(options, area);
}

fn render_footer(f: &mut Frame, footer_area: Rect, app: &App, run: &ActiveRun) {
    let theme = &app.theme;

    if let Some(notice) = &app.notice {
        crate::view::render_notice(f, footer_area, notice, theme);
        return;
    }

    let answered = run.current_answered();
    let footer_text = if answered {
        if run.is_last() {
            " n/Enter:finish  Esc:finish  ?:help  q:quit"
        } else {
            " n/Enter:next question  Esc:finish early  ?:help  q:quit"
        }
    } else if run.session.mode == StudyMode::Practice {
        " j/k:move  1-9:pick  Space/Enter:answer  Esc:finish early  ?:help  q:quit"
    } else {
        " j/k:move  1-9:pick  Space/Enter:lock answer  Esc:finish early  ?:help  q:quit"
    };
    let footer = Line::from(Span::styled(footer_text, theme.footer_style()));
    f.render_widget(Paragraph::new(footer), footer_area);
}
