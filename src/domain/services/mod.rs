pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod conversation;
pub mod events;
mod sanitizer;
mod scroll;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use conversation::*;
pub use sanitizer::*;
pub use scroll::*;
