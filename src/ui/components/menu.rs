use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub description: String,
}

pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            items: vec![
                MenuItem {
                    key: "1".to_string(),
                    label: "Review learned".to_string(),
                    description: "Cycle through cards you already know".to_string(),
                },
                MenuItem {
                    key: "2".to_string(),
                    label: "Learn new".to_string(),
                    description: "Study cards you have not learned yet".to_string(),
                },
                MenuItem {
                    key: "3".to_string(),
                    label: "Study all".to_string(),
                    description: "Work through the whole deck".to_string(),
                },
            ],
            selected: 0,
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(inner);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let marker = if is_selected { "> " } else { "  " };

            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let lines = vec![
                Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(format!("[{}] ", item.key), label_style),
                    Span::styled(&*item.label, label_style),
                ]),
                Line::from(Span::styled(
                    format!("      {}", item.description),
                    Style::default().fg(colors.muted()),
                )),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Left)
                .render(layout[i], buf);
        }
    }
}
