use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use robolab_core::model::Identity;
use robolab_core::router::{Screen, Subtree};

/// Top line: the tabs of the current subtree and who is signed in.
pub struct TabBar<'a> {
    pub subtree: Subtree,
    pub current: Screen,
    pub identity: Option<&'a Identity>,
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            " RoboLab ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];

        for tab in self.subtree.tabs() {
            let style = if *tab == self.current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(tab.title(), style));
        }

        if !self.subtree.tabs().contains(&self.current) {
            spans.push(Span::styled("  › ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                self.current.title(),
                Style::default().fg(Color::Yellow),
            ));
        }

        if let Some(identity) = self.identity {
            spans.push(Span::styled(
                format!("   {} ({})", identity.name(), identity.role().label()),
                Style::default().fg(Color::Magenta),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
