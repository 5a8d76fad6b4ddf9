use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::theme::Theme;

/// One-row session counter strip: promoted / in process / remaining.
pub struct StatsLine<'a> {
    pub learned: usize,
    pub in_process: usize,
    pub remaining: usize,
    pub theme: &'a Theme,
}

impl<'a> StatsLine<'a> {
    pub fn new(learned: usize, in_process: usize, remaining: usize, theme: &'a Theme) -> Self {
        Self {
            learned,
            in_process,
            remaining,
            theme,
        }
    }
}

impl Widget for StatsLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let stat = Style::default().fg(colors.stat());
        let muted = Style::default().fg(colors.muted());

        let line = Line::from(vec![
            Span::styled(" Learned: ", muted),
            Span::styled(format!("{}", self.learned), stat),
            Span::styled("  In process: ", muted),
            Span::styled(format!("{}", self.in_process), stat),
            Span::styled("  Remaining: ", muted),
            Span::styled(format!("{}", self.remaining), stat),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
