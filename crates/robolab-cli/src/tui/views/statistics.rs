use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use robolab_core::insights::{self, GroupStats};

use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let body = super::chrome(frame, app, area);
    let [category_area, difficulty_area, students_area] = Layout::vertical([
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Min(3),
    ])
    .areas(body);

    let by_category = insights::category_stats(&app.snapshot);
    let lines = group_lines(&by_category, category_area.width, |c| {
        (c.label(), super::category_color(c))
    });
    frame.render_widget(panel(lines, " By category "), category_area);

    let by_difficulty = insights::difficulty_stats(&app.snapshot);
    let lines = group_lines(&by_difficulty, difficulty_area.width, |d| {
        (d.label(), super::difficulty_color(d))
    });
    frame.render_widget(panel(lines, " By difficulty "), difficulty_area);

    let stats = insights::student_stats(&app.snapshot, &app.roster);
    let bar_width = students_area.width.saturating_sub(36) as usize;
    let lines: Vec<Line> = if stats.is_empty() {
        vec![Line::from(Span::styled(
            "  No students.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        stats
            .iter()
            .map(|s| {
                let (filled, empty) = super::bar(s.progress.percentage, bar_width);
                let color = super::percent_color(s.progress.percentage);
                Line::from(vec![
                    Span::styled(
                        format!("  {:<20}", super::truncate(s.student.identity.name(), 20)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(filled, Style::default().fg(color)),
                    Span::styled(empty, Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!(
                            " {:>3}% ({}/{})",
                            s.progress.percentage, s.progress.completed, s.progress.assigned
                        ),
                        Style::default().fg(color),
                    ),
                ])
            })
            .collect()
    };
    frame.render_widget(panel(lines, " Student progress "), students_area);
}

/// One bar per group, scaled to the largest project count.
fn group_lines<K: Copy>(
    stats: &[GroupStats<K>],
    width: u16,
    describe: impl Fn(K) -> (&'static str, Color),
) -> Vec<Line<'static>> {
    let max_count = stats.iter().map(|s| s.projects).max().unwrap_or(0).max(1);
    let bar_width = width.saturating_sub(40) as usize;

    stats
        .iter()
        .map(|s| {
            let (label, color) = describe(s.key);
            let filled = s.projects * bar_width / max_count;
            Line::from(vec![
                Span::styled(
                    format!("  {label:<14}"),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled("█".repeat(filled), Style::default().fg(Color::Cyan)),
                Span::styled(
                    "░".repeat(bar_width.saturating_sub(filled)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!(" {} projects", s.projects),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    format!(", {} completed", s.completed),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect()
}

fn panel<'a>(lines: Vec<Line<'a>>, title: &'a str) -> Paragraph<'a> {
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title),
    )
}
