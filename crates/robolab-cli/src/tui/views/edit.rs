use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{App, FormField, ProjectForm};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let body = super::chrome(frame, app, area);
    let form = &app.form;

    let rows = Layout::vertical([
        Constraint::Length(3), // title
        Constraint::Length(4), // description
        Constraint::Length(3), // image url
        Constraint::Length(3), // duration
        Constraint::Length(3), // category | difficulty | available
        Constraint::Min(4),    // materials | steps
    ])
    .split(body);
    let [category_area, difficulty_area, available_area] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(rows[4]);
    let [materials_area, steps_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(rows[5]);

    let heading = if form.editing.is_some() {
        " Edit project "
    } else {
        " New project "
    };
    for (field, field_area) in [
        (FormField::Title, rows[0]),
        (FormField::Description, rows[1]),
        (FormField::ImageUrl, rows[2]),
        (FormField::Duration, rows[3]),
        (FormField::Materials, materials_area),
        (FormField::Steps, steps_area),
    ] {
        render_text_field(frame, form, field, field_area, heading);
    }

    render_selector(
        frame,
        form,
        FormField::Category,
        form.category.label(),
        category_area,
    );
    render_selector(
        frame,
        form,
        FormField::Difficulty,
        form.difficulty.label(),
        difficulty_area,
    );
    render_selector(
        frame,
        form,
        FormField::Available,
        if form.available { "Yes" } else { "No" },
        available_area,
    );
}

fn border_style(form: &ProjectForm, field: FormField) -> Style {
    if form.current_field() == field {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_text_field(
    frame: &mut Frame,
    form: &ProjectForm,
    field: FormField,
    area: Rect,
    heading: &str,
) {
    let text = form.text(field).unwrap_or_default();
    let title = if field == FormField::Title {
        format!("{heading}· {} ", field.label())
    } else {
        format!(" {} ", field.label())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(form, field))
        .title(title);
    let widget = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(widget, area);

    if form.current_field() == field {
        // Approximate cursor position: end of the last line
        let inner_width = area.width.saturating_sub(2) as usize;
        if inner_width > 0 {
            let last_line = if text.ends_with('\n') {
                ""
            } else {
                text.lines().last().unwrap_or("")
            };
            let line_count = text.lines().count() + usize::from(text.ends_with('\n'));
            let column = u16::try_from(last_line.chars().count() % inner_width).unwrap_or(0);
            let row = u16::try_from(line_count.max(1) - 1).unwrap_or(u16::MAX);
            let cursor_x = area.x.saturating_add(1).saturating_add(column);
            let cursor_y = area.y.saturating_add(1).saturating_add(row);
            frame.set_cursor_position((
                cursor_x.min(area.right().saturating_sub(2)),
                cursor_y.min(area.bottom().saturating_sub(2)),
            ));
        }
    }
}

fn render_selector(frame: &mut Frame, form: &ProjectForm, field: FormField, value: &str, area: Rect) {
    let arrow = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled(" < ", arrow),
        Span::styled(
            value.to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", arrow),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(form, field))
        .title(format!(" {} ", field.label()));
    frame.render_widget(Paragraph::new(line).block(block), area);
}
