use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LOGO: &[&str] = &[
    r" ____       _           _           _     ",
    r"|  _ \ ___ | |__   ___ | |    __ _ | |__  ",
    r"| |_) / _ \| '_ \ / _ \| |   / _` || '_ \ ",
    r"|  _ < (_) | |_) | (_) | |__| (_| || |_) |",
    r"|_| \_\___/|_.__/ \___/|_____\__,_||_.__/ ",
];

/// Shown until the initial catalog fetch resolves.
pub fn render(frame: &mut Frame, area: Rect) {
    let block_height = LOGO.len() as u16 + 5;
    let block_width = 46;

    let [center_y] = Layout::vertical([Constraint::Length(block_height)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(block_width)])
        .flex(Flex::Center)
        .areas(center_y);

    let mut lines: Vec<Line> = LOGO
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "       Robotics projects for the classroom",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "             Loading projects...",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));

    frame.render_widget(Paragraph::new(lines), center);
}
