#[cfg(test)]
#[path = "loading_test.rs"]
mod tests;

use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Dots shown while waiting on the assistant, advanced on every UI tick.
#[derive(Default)]
pub struct Loading {
    dots: usize,
}

impl Loading {
    pub fn tick(&mut self) {
        if self.dots >= 3 {
            self.dots = 0;
        } else {
            self.dots += 1;
        }
    }

    pub fn reset(&mut self) {
        self.dots = 0;
    }

    pub fn text(&self) -> String {
        return ".".repeat(self.dots);
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        frame.render_widget(
            Paragraph::new(self.text())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .title("L'assistant écrit")
                        .padding(Padding::new(1, 1, 0, 0)),
                )
                .alignment(Alignment::Center),
            rect,
        );
    }
}
