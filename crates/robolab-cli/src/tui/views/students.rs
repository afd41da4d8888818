use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use robolab_core::insights;

use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let body = super::chrome(frame, app, area);
    let stats = insights::student_stats(&app.snapshot, &app.roster);

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Grade"),
        Cell::from("Joined"),
        Cell::from("Projects"),
        Cell::from("Done"),
        Cell::from("Progress"),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = stats
        .iter()
        .map(|s| {
            let (filled, empty) = super::bar(s.progress.percentage, 10);
            let color = super::percent_color(s.progress.percentage);
            Row::new(vec![
                Cell::from(s.student.identity.name().to_string()),
                Cell::from(Span::styled(
                    s.student.profile.grade.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
                Cell::from(Span::styled(
                    s.student.profile.joined_on.format("%Y-%m-%d").to_string(),
                    Style::default().fg(Color::DarkGray),
                )),
                Cell::from(s.progress.assigned.to_string()),
                Cell::from(s.progress.completed.to_string()),
                Cell::from(ratatui::text::Line::from(vec![
                    Span::styled(filled, Style::default().fg(color)),
                    Span::styled(empty, Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!(" {}%", s.progress.percentage),
                        Style::default().fg(color),
                    ),
                ])),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Length(6),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" Students ({}) ", stats.len())),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::Indexed(236))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = TableState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(table, body, &mut state);
}
