use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let body = super::chrome(frame, app, area);

    let [center] = Layout::vertical([Constraint::Length(12)])
        .flex(Flex::Center)
        .areas(body);
    let [center] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(center);

    let lines = vec![
        Line::from(Span::styled(
            "Welcome to RoboLab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Build robots step by step: pick a project, gather the materials,"),
        Line::from("follow the steps and track your progress."),
        Line::from(""),
        Line::from(format!(
            "{} projects in the catalog.",
            app.snapshot.projects.len()
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" to sign in."),
        ]),
    ];

    let welcome = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(welcome, center);
}
