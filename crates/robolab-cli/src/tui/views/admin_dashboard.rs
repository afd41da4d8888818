use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use robolab_core::insights;

use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let body = super::chrome(frame, app, area);
    let [numbers_area, recent_area] =
        Layout::vertical([Constraint::Length(7), Constraint::Min(3)]).areas(body);

    let overview = insights::catalog_overview(&app.snapshot);
    let number = |label: &'static str, value: usize, color: Color| {
        Line::from(vec![
            Span::styled(format!("  {label:<22}"), Style::default().fg(Color::DarkGray)),
            Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ])
    };

    let lines = vec![
        number("Projects", overview.total_projects, Color::Cyan),
        number("Available to students", overview.available_projects, Color::Cyan),
        number("Completed assignments", overview.completed, Color::Green),
        number("In progress", overview.in_progress, Color::Yellow),
        number("Students", app.roster.len(), Color::Magenta),
    ];
    let numbers = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Overview "),
    );
    frame.render_widget(numbers, numbers_area);

    // Most recently created projects first
    let mut recent: Vec<_> = app.snapshot.projects.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let recent_lines: Vec<Line> = recent
        .iter()
        .take(usize::from(recent_area.height.saturating_sub(2)))
        .map(|p| {
            Line::from(vec![
                Span::styled(
                    format!("  {} ", p.created_at.format("%Y-%m-%d")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<12}", p.category.label()),
                    Style::default().fg(super::category_color(p.category)),
                ),
                Span::raw(super::truncate(&p.title, 50)),
                if p.available {
                    Span::raw("")
                } else {
                    Span::styled("  (hidden)", Style::default().fg(Color::DarkGray))
                },
            ])
        })
        .collect();

    let recent_widget = Paragraph::new(recent_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Recent projects "),
    );
    frame.render_widget(recent_widget, recent_area);
}
