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
    let [progress_area, lists_area] =
        Layout::vertical([Constraint::Length(5), Constraint::Min(5)]).areas(body);
    let [active_area, recommended_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(lists_area);

    let mine = app.my_projects();
    let progress = insights::student_progress(&mine);
    let name = app.identity().map(|i| i.name()).unwrap_or_default();

    let (filled, empty) = super::bar(
        progress.percentage,
        progress_area.width.saturating_sub(12) as usize,
    );
    let color = super::percent_color(progress.percentage);
    let lines = vec![
        Line::from(Span::styled(
            format!("  Hello, {name}!"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(filled, Style::default().fg(color)),
            Span::styled(empty, Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!(" {}%", progress.percentage),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "  {} assigned · {} completed · {} in progress",
                progress.assigned, progress.completed, progress.in_progress
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(panel(lines, " My progress "), progress_area);

    let active: Vec<Line> = mine
        .iter()
        .filter(|a| !a.assignment.is_completed())
        .map(|a| {
            Line::from(vec![
                Span::styled("  ▶ ", Style::default().fg(Color::Yellow)),
                Span::raw(super::truncate(&a.project.title, 40)),
                Span::styled(
                    format!("  since {}", a.assignment.started_at.format("%Y-%m-%d")),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    let active = if active.is_empty() {
        vec![Line::from(Span::styled(
            "  Nothing in progress. Press b to browse projects.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        active
    };
    frame.render_widget(panel(active, " In progress "), active_area);

    let student = app.identity().map(|i| i.id());
    let recommended: Vec<Line> = student
        .map(|id| insights::recommended_projects(&app.snapshot, id, app.recommended_limit))
        .unwrap_or_default()
        .into_iter()
        .map(|p| {
            Line::from(vec![
                Span::styled("  ★ ", Style::default().fg(Color::Cyan)),
                Span::raw(super::truncate(&p.title, 36)),
                Span::styled(
                    format!("  {}", p.difficulty.label()),
                    Style::default().fg(super::difficulty_color(p.difficulty)),
                ),
            ])
        })
        .collect();
    let recommended = if recommended.is_empty() {
        vec![Line::from(Span::styled(
            "  You have taken on every available project.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        recommended
    };
    frame.render_widget(panel(recommended, " Recommended "), recommended_area);
}

fn panel<'a>(lines: Vec<Line<'a>>, title: &'a str) -> Paragraph<'a> {
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title),
    )
}
