use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use robolab_core::model::Project;

use super::section;
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let body = super::chrome(frame, app, area);

    let Some(project) = app.detail_project() else {
        let msg = Paragraph::new("  This project no longer exists. Press Esc to go back.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, body);
        return;
    };

    let [title_area, meta_area, content_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(5),
    ])
    .areas(body);

    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", project.category.label()),
            Style::default()
                .fg(super::category_color(project.category))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(&project.title, Style::default().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(
        Paragraph::new(title).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        title_area,
    );

    let sep = || Span::styled(" │ ", Style::default().fg(Color::DarkGray));
    let mut meta = vec![
        Span::styled(
            format!(" #{}", project.id),
            Style::default().fg(Color::Cyan),
        ),
        sep(),
        Span::styled(
            project.difficulty.label(),
            Style::default().fg(super::difficulty_color(project.difficulty)),
        ),
        sep(),
        Span::styled(project.duration.as_str(), Style::default().fg(Color::DarkGray)),
        sep(),
        Span::styled(
            project.created_at.format("%Y-%m-%d").to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    meta.push(sep());
    meta.push(status_span(app, project));
    frame.render_widget(Paragraph::new(Line::from(meta)), meta_area);

    render_content(frame, app, project, content_area);
}

fn status_span(app: &App, project: &Project) -> Span<'static> {
    if app.is_admin() {
        return if project.available {
            Span::styled("visible to students", Style::default().fg(Color::Green))
        } else {
            Span::styled("hidden from students", Style::default().fg(Color::DarkGray))
        };
    }
    let assignment = app
        .identity()
        .and_then(|me| app.snapshot.assignment(me.id(), project.id));
    match assignment {
        Some(a) => match a.completed_at() {
            Some(at) => Span::styled(
                format!("✓ completed {}", at.format("%Y-%m-%d")),
                Style::default().fg(Color::Green),
            ),
            None => Span::styled(
                format!("▶ started {}", a.started_at.format("%Y-%m-%d")),
                Style::default().fg(Color::Yellow),
            ),
        },
        None => Span::styled(
            "not started (press a)",
            Style::default().fg(Color::DarkGray),
        ),
    }
}

fn render_content(frame: &mut Frame, app: &App, project: &Project, area: Rect) {
    let mut lines: Vec<Line> = vec![section("Description"), Line::from("")];
    for line in project.description.lines() {
        lines.push(Line::from(format!("  {line}")));
    }

    lines.push(Line::from(""));
    lines.push(section(&format!("Materials ({})", project.materials.len())));
    lines.push(Line::from(""));
    for material in &project.materials {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(Color::Cyan)),
            Span::raw(material.clone()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(section(&format!("Steps ({})", project.steps.len())));
    lines.push(Line::from(""));
    for (i, step) in project.steps.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>2}. ", i + 1), Style::default().fg(Color::Cyan)),
            Span::raw(step.clone()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(section("Image"));
    lines.push(Line::from(Span::styled(
        format!("  {}", project.image_url),
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Detail (j/k to scroll) "),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    frame.render_widget(paragraph, area);
}
