use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};
use robolab_core::router::Screen;

use crate::tui::app::InputMode;

/// Bottom help bar showing context-sensitive key bindings.
pub struct HelpBar {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub admin: bool,
}

impl HelpBar {
    fn bindings(&self) -> &'static [(&'static str, &'static str)] {
        match (self.screen, self.input_mode) {
            (Screen::AdminProjects | Screen::ProjectsList, InputMode::Search) => {
                &[("Enter", "keep"), ("Esc", "clear")]
            }
            (Screen::AdminProjects | Screen::ProjectsList, InputMode::Filter) => &[
                ("←/→", "category"),
                ("↑/↓", "difficulty"),
                ("Enter/Esc", "confirm"),
            ],
            (Screen::Home, _) => &[("Enter", "sign in"), ("q", "quit")],
            (Screen::Login, _) => &[
                ("Tab", "next field"),
                ("Enter", "sign in"),
                ("Esc", "back"),
            ],
            (Screen::AdminDashboard, _) => &[
                ("p", "projects"),
                ("s", "students"),
                ("t", "statistics"),
                ("Tab", "next tab"),
                ("L", "log out"),
                ("q", "quit"),
            ],
            (Screen::AdminProjects, _) => &[
                ("j/k", "navigate"),
                ("Enter", "open"),
                ("n", "new"),
                ("e", "edit"),
                ("a", "availability"),
                ("d", "delete"),
                ("/", "search"),
                ("f", "filter"),
                ("Tab", "next tab"),
            ],
            (Screen::ProjectsList, _) => &[
                ("j/k", "navigate"),
                ("Enter", "open"),
                ("/", "search"),
                ("f", "filter"),
                ("r", "refresh"),
                ("Tab", "next tab"),
                ("q", "quit"),
            ],
            (Screen::AdminStudents, _) => &[("j/k", "navigate"), ("Esc", "back"), ("q", "quit")],
            (Screen::AdminStatistics, _) => &[("r", "refresh"), ("Esc", "back"), ("q", "quit")],
            (Screen::AdminEditProject, _) => &[
                ("Tab", "next field"),
                ("Shift+Tab", "prev field"),
                ("←/→", "change"),
                ("Ctrl+S", "save"),
                ("Esc", "cancel"),
            ],
            (Screen::ProjectDetail, _) if self.admin => &[
                ("j/k", "scroll"),
                ("e", "edit"),
                ("Esc", "back"),
                ("q", "quit"),
            ],
            (Screen::ProjectDetail, _) => &[
                ("j/k", "scroll"),
                ("a", "start project"),
                ("c", "complete"),
                ("Esc", "back"),
                ("q", "quit"),
            ],
            (Screen::StudentDashboard, _) => &[
                ("b", "browse"),
                ("Tab", "next tab"),
                ("r", "refresh"),
                ("L", "log out"),
                ("q", "quit"),
            ],
            (Screen::StudentProfile, _) => &[
                ("Tab", "next tab"),
                ("L", "log out"),
                ("q", "quit"),
            ],
        }
    }
}

impl Widget for HelpBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::DarkGray);
        let key_style = Style::default().fg(Color::Cyan);

        let spans: Vec<Span> = self
            .bindings()
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(*key, key_style),
                    Span::styled(format!(" {label}  "), style),
                ]
            })
            .collect();

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
