use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use robolab_core::insights::{self, AssignedProject};

use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let body = super::chrome(frame, app, area);
    let [info_area, categories_area, history_area] = Layout::vertical([
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Min(4),
    ])
    .areas(body);

    let mine = app.my_projects();
    let progress = insights::student_progress(&mine);
    let favorite = insights::favorite_category(&mine);
    let profile = app.identity().and_then(|me| {
        app.roster
            .iter()
            .find(|s| s.identity.id() == me.id())
            .map(|s| &s.profile)
    });

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let mut info = vec![Line::from(vec![
        label("  Name:      "),
        Span::styled(
            app.identity().map(|i| i.name().to_string()).unwrap_or_default(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])];
    if let Some(profile) = profile {
        info.push(Line::from(vec![
            label("  Grade:     "),
            Span::raw(profile.grade.clone()),
        ]));
        info.push(Line::from(vec![
            label("  Joined:    "),
            Span::raw(profile.joined_on.format("%Y-%m-%d").to_string()),
        ]));
    }
    info.push(Line::from(vec![
        label("  Progress:  "),
        Span::styled(
            format!(
                "{}% ({} of {} completed)",
                progress.percentage, progress.completed, progress.assigned
            ),
            Style::default().fg(super::percent_color(progress.percentage)),
        ),
    ]));
    info.push(Line::from(vec![
        label("  Favorite:  "),
        match favorite {
            Some(c) => Span::styled(c.label(), Style::default().fg(super::category_color(c))),
            None => label("none yet"),
        },
    ]));
    frame.render_widget(panel(info, " Profile "), info_area);

    let bar_width = categories_area.width.saturating_sub(26) as usize;
    let categories: Vec<Line> = insights::category_distribution(&mine)
        .into_iter()
        .map(|share| {
            let (filled, empty) = super::bar(share.percentage, bar_width);
            Line::from(vec![
                Span::styled(
                    format!("  {:<13}", share.category.label()),
                    Style::default().fg(super::category_color(share.category)),
                ),
                Span::styled(filled, Style::default().fg(Color::Cyan)),
                Span::styled(empty, Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!(" {} ({}%)", share.count, share.percentage),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    frame.render_widget(panel(categories, " Categories "), categories_area);

    let [completed_area, active_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(history_area);
    let (completed, active): (Vec<&AssignedProject>, Vec<&AssignedProject>) =
        mine.iter().partition(|a| a.assignment.is_completed());
    frame.render_widget(
        panel(project_lines(&completed, "✓", Color::Green), " Completed "),
        completed_area,
    );
    frame.render_widget(
        panel(project_lines(&active, "▶", Color::Yellow), " In progress "),
        active_area,
    );
}

fn project_lines(projects: &[&AssignedProject], symbol: &str, color: Color) -> Vec<Line<'static>> {
    if projects.is_empty() {
        return vec![Line::from(Span::styled(
            "  None",
            Style::default().fg(Color::DarkGray),
        ))];
    }
    projects
        .iter()
        .map(|a| {
            let when = a.assignment.completed_at().unwrap_or(a.assignment.started_at);
            Line::from(vec![
                Span::styled(format!("  {symbol} "), Style::default().fg(color)),
                Span::raw(super::truncate(&a.project.title, 32)),
                Span::styled(
                    format!("  {}", when.format("%Y-%m-%d")),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect()
}

fn panel<'a>(lines: Vec<Line<'a>>, title: &'a str) -> Paragraph<'a> {
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title),
    )
}
