pub mod config;
pub mod dashboard;
pub mod help;
pub mod history;
pub mod quit_confirm;
pub mod results;
pub mod run;
pub mod settings;
pub mod settings_confirm;
pub mod upload;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::Screen;
use crate::theme::Theme;

/// Spinner frames for animated progress indication.
const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];

/// Get the current spinner character based on a tick counter.
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.len() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}

/// Render the top bar: app badge, current screen, library stats on the right.
pub fn render_header(f: &mut Frame, area: Rect, theme: &Theme, screen: Screen, stats: Line) {
    let stats_width = stats.width() as u16;
    let [title_area, stats_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(stats_width)]).areas(area);

    let title = Line::from(vec![
        Span::styled(" QUIZFORGE ", theme.header_style()),
        Span::styled(
            format!(" > {}", screen.title()),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(title), title_area);
    f.render_widget(Paragraph::new(stats), stats_area);
}

/// Format a duration in seconds as `m:ss`.
pub fn format_elapsed(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Render a transient notice in the footer row, replacing the key hints.
pub fn render_notice(f: &mut Frame, area: Rect, notice: &crate::app::Notice, theme: &Theme) {
    let color = match notice.kind {
        crate::app::NoticeKind::Info => theme.correct,
        crate::app::NoticeKind::Warn => theme.pending,
    };
    let line = Line::from(Span::styled(
        format!(" {}", notice.text),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(line), area);
}
