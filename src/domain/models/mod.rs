mod action;
mod completion;
mod event;
mod loading;
mod message;
mod notification;
mod textarea;
mod voice;

pub use action::*;
pub use completion::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use notification::*;
pub use textarea::*;
pub use voice::*;
