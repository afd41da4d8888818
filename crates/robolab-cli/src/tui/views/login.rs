use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::{App, LoginField};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let body = super::chrome(frame, app, area);

    let [center] = Layout::horizontal([Constraint::Length(50)])
        .flex(Flex::Center)
        .areas(body);
    let [username_area, password_area, status_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(4),
    ])
    .flex(Flex::Center)
    .areas(center);

    let field_style = |field: LoginField| {
        if app.login.field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let username = Paragraph::new(app.login.username.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(field_style(LoginField::Username))
            .title(" Username "),
    );
    frame.render_widget(username, username_area);

    let masked = "•".repeat(app.login.password.chars().count());
    let password = Paragraph::new(masked.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(field_style(LoginField::Password))
            .title(" Password "),
    );
    frame.render_widget(password, password_area);

    let (focused_area, typed) = match app.login.field {
        LoginField::Username => (username_area, app.login.username.chars().count()),
        LoginField::Password => (password_area, app.login.password.chars().count()),
    };
    frame.set_cursor_position((
        super::cursor_column(focused_area, typed),
        focused_area.y.saturating_add(1),
    ));

    if app.loading {
        frame.render_widget(
            Line::from(Span::styled(
                "  Signing in...",
                Style::default().fg(Color::Yellow),
            )),
            status_area,
        );
    }

    let hint = Paragraph::new(vec![
        Line::from(Span::styled(
            "Demo accounts",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "  admin / admin123",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "  student1 .. student4 / 123456",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(hint, hint_area);
}
