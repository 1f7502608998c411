#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use std::collections::HashMap;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use crate::domain::models::Message;

struct BubbleCacheEntry<'a> {
    id: String,
    text_len: usize,
    lines: Vec<Line<'a>>,
}

/// Renders the conversation as chat bubbles. Messages are append-only, so
/// bubbles are cached per index and only rebuilt when the width changes.
pub struct BubbleList<'a> {
    cache: HashMap<usize, BubbleCacheEntry<'a>>,
    line_width: usize,
    lines_len: usize,
}

impl<'a> Default for BubbleList<'a> {
    fn default() -> BubbleList<'a> {
        return BubbleList {
            cache: HashMap::new(),
            line_width: 0,
            lines_len: 0,
        };
    }
}

impl<'a> BubbleList<'a> {
    pub fn set_messages(&mut self, messages: &[Message], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }

        self.cache.retain(|idx, _| return *idx < messages.len());

        self.lines_len = messages
            .iter()
            .enumerate()
            .map(|(idx, message)| {
                if let Some(cache_entry) = self.cache.get(&idx) {
                    if cache_entry.id == message.id && cache_entry.text_len == message.text.len() {
                        return cache_entry.lines.len();
                    }
                }

                let bubble_lines = Bubble::new(message, line_width).as_lines();
                let bubble_line_len = bubble_lines.len();

                self.cache.insert(
                    idx,
                    BubbleCacheEntry {
                        id: message.id.to_string(),
                        text_len: message.text.len(),
                        lines: bubble_lines,
                    },
                );

                return bubble_line_len;
            })
            .sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();
        let lines: Vec<Line<'a>> = indexes
            .iter()
            .filter_map(|idx| return self.cache.get(idx))
            .flat_map(|entry| {
                return entry.lines.to_owned();
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
