use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        return TextArea::with_text("", false);
    }

    /// Replaces the whole content, used when a voice transcript arrives.
    pub fn with_text(text: &str, listening: bool) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::new(
            text.split('\n')
                .map(|line| return line.to_string())
                .collect::<Vec<String>>(),
        );
        textarea.set_block(TextArea::block(listening));
        textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        textarea.move_cursor(tui_textarea::CursorMove::End);

        return textarea;
    }

    pub fn block(listening: bool) -> Block<'a> {
        let mut title = "Votre message (CTRL+T pour dicter)";
        if listening {
            title = "Écoute en cours... (CTRL+T pour arrêter)";
        }

        return Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .title(title)
            .padding(Padding::new(1, 1, 0, 0));
    }
}
