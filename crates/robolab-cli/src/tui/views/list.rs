use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use robolab_core::model::Project;
use robolab_core::router::Screen;

use crate::tui::{
    app::{App, InputMode},
    widgets::{filter_bar::FilterBar, search_input::SearchInput},
};

/// Project list shared by the admin management tab and the student
/// browse tab.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let body = super::chrome(frame, app, area);
    let [search_area, filter_area, table_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(5),
    ])
    .areas(body);

    frame.render_widget(
        SearchInput {
            text: &app.filter.query,
            focused: app.input_mode == InputMode::Search,
        },
        search_area,
    );

    frame.render_widget(
        FilterBar {
            category: app.filter.category,
            difficulty: app.filter.difficulty,
            active: app.input_mode == InputMode::Filter,
        },
        filter_area,
    );

    render_table(frame, app, table_area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    if app.loading && app.snapshot.projects.is_empty() {
        let loading = Line::from(vec![Span::styled(
            "  Loading...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]);
        frame.render_widget(loading, area);
        return;
    }

    let admin = app.screen() == Screen::AdminProjects;
    let projects = app.visible_projects();

    let mut header = vec!["Title", "Category", "Level", "Duration"];
    header.push(if admin { "Visible" } else { "Status" });
    let header = Row::new(header.into_iter().map(Cell::from).collect::<Vec<_>>())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = if projects.is_empty() {
        vec![Row::new(vec![Cell::from(Span::styled(
            "  No projects match. Press Esc to clear filters.",
            Style::default().fg(Color::DarkGray),
        ))])]
    } else {
        projects
            .iter()
            .map(|p| make_project_row(app, p, admin))
            .collect()
    };

    let widths = [
        Constraint::Min(24),
        Constraint::Length(13),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let title = if admin {
        format!(" Manage projects ({}) ", projects.len())
    } else {
        format!(" Available projects ({}) ", projects.len())
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title),
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
    frame.render_stateful_widget(table, area, &mut state);
}

fn make_project_row(app: &App, project: &Project, admin: bool) -> Row<'static> {
    let title_cell = Cell::from(super::truncate(&project.title, 48));
    let category_cell = Cell::from(Span::styled(
        project.category.label(),
        Style::default().fg(super::category_color(project.category)),
    ));
    let level_cell = Cell::from(Span::styled(
        project.difficulty.label(),
        Style::default().fg(super::difficulty_color(project.difficulty)),
    ));
    let duration_cell = Cell::from(Span::styled(
        project.duration.clone(),
        Style::default().fg(Color::DarkGray),
    ));

    let (status, color) = if admin {
        if project.available {
            ("● shown", Color::Green)
        } else {
            ("○ hidden", Color::DarkGray)
        }
    } else {
        let assignment = app
            .identity()
            .and_then(|me| app.snapshot.assignment(me.id(), project.id));
        match assignment {
            Some(a) if a.is_completed() => ("✓ done", Color::Green),
            Some(_) => ("▶ started", Color::Yellow),
            None => ("", Color::DarkGray),
        }
    };
    let status_cell = Cell::from(Span::styled(status, Style::default().fg(color)));

    Row::new(vec![
        title_cell,
        category_cell,
        level_cell,
        duration_cell,
        status_cell,
    ])
}
