#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Usage;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    pub usage: Option<Usage>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    pub metadata: Option<MessageMetadata>,
}

impl Message {
    pub fn user(id: &str, text: &str) -> Message {
        return Message {
            id: id.to_string(),
            text: text.to_string(),
            is_user: true,
            metadata: None,
        };
    }

    pub fn assistant(id: &str, text: &str) -> Message {
        return Message {
            id: id.to_string(),
            text: text.to_string(),
            is_user: false,
            metadata: None,
        };
    }

    pub fn with_usage(mut self, usage: Option<Usage>) -> Message {
        self.metadata = Some(MessageMetadata { usage });
        return self;
    }

    pub fn usage(&self) -> Option<&Usage> {
        return self.metadata.as_ref().and_then(|e| return e.usage.as_ref());
    }

    pub fn author_label(&self) -> &'static str {
        if self.is_user {
            return "Vous";
        }

        return "Assistant";
    }

    /// Text as drawn on screen. The stored text is kept verbatim.
    pub fn display_text(&self) -> String {
        return self.text.replace('\t', "  ");
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let text = self.display_text();

        for full_line in text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_lines: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                let word_len = word.chars().count();
                if !current_lines.is_empty() && char_count + word_len > line_max_width {
                    lines.push(current_lines.join(" ").trim_end().to_string());
                    current_lines = vec![word];
                    char_count = word_len + 1;
                } else {
                    current_lines.push(word);
                    char_count += word_len + 1;
                }
            }
            if !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
