#[cfg(test)]
#[path = "sanitizer_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

static REASONING_BLOCK: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"(?s)<think>.*?</think>").unwrap());

fn needs_separator(before: Option<char>, after: Option<char>) -> bool {
    match (before, after) {
        (Some(b), Some(a)) => return !b.is_whitespace() && !a.is_whitespace(),
        _ => return false,
    }
}

/// Strips every `<think>...</think>` reasoning block from an assistant answer
/// and trims the result. A block wedged between two words leaves a single
/// space so the words stay apart. Unclosed markers are kept as is.
pub fn sanitize(text: &str) -> String {
    let mut res = String::with_capacity(text.len());
    let mut last_end = 0;

    for block in REASONING_BLOCK.find_iter(text) {
        res.push_str(&text[last_end..block.start()]);
        last_end = block.end();

        if needs_separator(res.chars().last(), text[last_end..].chars().next()) {
            res.push(' ');
        }
    }
    res.push_str(&text[last_end..]);

    return res.trim().to_string();
}
