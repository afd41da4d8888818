pub mod admin_dashboard;
pub mod detail;
pub mod edit;
pub mod home;
pub mod list;
pub mod login;
pub mod profile;
pub mod splash;
pub mod statistics;
pub mod student_dashboard;
pub mod students;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use robolab_core::model::{Category, Difficulty};

use crate::tui::{
    app::App,
    widgets::{help_bar::HelpBar, tab_bar::TabBar},
};

/// Split `area` into tab bar, body and help bar, drawing the two bars.
/// Returns the body.
fn chrome(frame: &mut Frame, app: &App, area: Rect) -> Rect {
    let [top, body, bottom] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        TabBar {
            subtree: app.nav.subtree(),
            current: app.screen(),
            identity: app.identity(),
        },
        top,
    );
    frame.render_widget(
        HelpBar {
            screen: app.screen(),
            input_mode: app.input_mode,
            admin: app.is_admin(),
        },
        bottom,
    );
    body
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("─── {title} ───"),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Beginner => Color::Green,
        Difficulty::Intermediate => Color::Yellow,
        Difficulty::Advanced => Color::Red,
    }
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Mechanics => Color::Blue,
        Category::Electronics => Color::Yellow,
        Category::Programming => Color::Magenta,
        Category::Design => Color::LightRed,
        Category::Science => Color::Green,
    }
}

fn percent_color(percentage: u8) -> Color {
    if percentage >= 70 {
        Color::Green
    } else if percentage >= 40 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// A text progress bar `width` cells wide.
fn bar(percentage: u8, width: usize) -> (String, String) {
    let filled = (usize::from(percentage.min(100)) * width) / 100;
    ("█".repeat(filled), "░".repeat(width.saturating_sub(filled)))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        text.to_string()
    }
}

/// Cursor column after `typed` characters in a bordered single-line field,
/// kept inside the border however long the input gets.
fn cursor_column(field: Rect, typed: usize) -> u16 {
    let inner_width = field.width.saturating_sub(2);
    let offset = u16::try_from(typed).unwrap_or(u16::MAX).min(inner_width.saturating_sub(1));
    field.x.saturating_add(1).saturating_add(offset)
}
