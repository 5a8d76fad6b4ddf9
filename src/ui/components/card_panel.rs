use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

/// What the study screen is showing in its main panel.
pub enum CardView<'a> {
    Question { text: &'a str, retry: bool },
    Complete,
}

pub struct CardPanel<'a> {
    pub view: CardView<'a>,
    pub theme: &'a Theme,
}

impl<'a> CardPanel<'a> {
    pub fn new(view: CardView<'a>, theme: &'a Theme) -> Self {
        Self { view, theme }
    }
}

impl Widget for CardPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        match self.view {
            CardView::Question { text, retry } => {
                if retry {
                    lines.push(Line::from(Span::styled(
                        "Review it and try again...",
                        Style::default()
                            .fg(colors.bad())
                            .add_modifier(Modifier::ITALIC),
                    )));
                    lines.push(Line::default());
                }
                lines.push(Line::from(Span::styled(
                    text.trim_end_matches('\n').to_string(),
                    Style::default()
                        .fg(colors.question())
                        .add_modifier(Modifier::BOLD),
                )));
            }
            CardView::Complete => {
                lines.push(Line::from(Span::styled(
                    "Well done! You answered every card in this session.",
                    Style::default()
                        .fg(colors.good())
                        .add_modifier(Modifier::BOLD),
                )));
            }
        }

        let vertical_pad = inner.height.saturating_sub(lines.len() as u16) / 2;
        let padded: Vec<Line> = std::iter::repeat_with(Line::default)
            .take(vertical_pad as usize)
            .chain(lines)
            .collect();

        Paragraph::new(padded)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
