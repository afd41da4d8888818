use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use robolab_core::model::{Category, Difficulty};

/// Filter bar showing the category and difficulty filters.
pub struct FilterBar {
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub active: bool,
}

impl FilterBar {
    fn option_spans<T: Copy + PartialEq>(
        &self,
        spans: &mut Vec<Span<'static>>,
        all: &[T],
        selected: Option<T>,
        label: impl Fn(T) -> &'static str,
    ) {
        let options = std::iter::once(None).chain(all.iter().copied().map(Some));
        for (i, option) in options.enumerate() {
            if i > 0 {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
            let text = option.map_or("All", &label);
            let style = if option == selected {
                if self.active {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                }
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {text} "), style));
        }
    }
}

impl Widget for FilterBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let prefix_style = Style::default().fg(Color::DarkGray);
        let mut spans: Vec<Span> = Vec::new();

        spans.push(Span::styled(
            if self.active { "Filter › " } else { "Category: " },
            prefix_style,
        ));
        self.option_spans(&mut spans, &Category::ALL, self.category, |c| c.label());

        spans.push(Span::styled("   Level: ", prefix_style));
        self.option_spans(&mut spans, &Difficulty::ALL, self.difficulty, |d| d.label());

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
