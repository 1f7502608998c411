pub mod completions;
pub mod voice;
