#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

const TICK_INTERVAL: time::Duration = time::Duration::from_millis(500);

fn key_event(input: Input) -> Event {
    if input.ctrl {
        match input.key {
            Key::Char('c') => return Event::KeyboardCTRLC(),
            Key::Char('t') => return Event::KeyboardCTRLT(),
            Key::Char('d') => return Event::UIScrollPageDown(),
            Key::Char('u') => return Event::UIScrollPageUp(),
            _ => (),
        }
    }

    match input.key {
        Key::Enter => return Event::KeyboardEnter(),
        Key::Esc => return Event::KeyboardEsc(),
        Key::Down => return Event::UIScrollDown(),
        Key::Up => return Event::UIScrollUp(),
        Key::PageDown => return Event::UIScrollPageDown(),
        Key::PageUp => return Event::UIScrollPageUp(),
        _ => return Event::KeyboardCharInput(input),
    }
}

fn terminal_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(keyevent) => return Some(key_event(keyevent.into())),
        CrosstermEvent::Paste(text) => return Some(Event::KeyboardPaste(text)),
        CrosstermEvent::Resize(_, _) => return Some(Event::UIResize()),
        CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
            MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
            MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
            _ => return None,
        },
        _ => return None,
    }
}

/// Merges terminal input with events produced by background workers.
pub struct EventsService {
    terminal_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            terminal_events: EventStream::new(),
            events,
        };
    }

    /// Waits for the next event the chat panel reacts to.
    ///
    /// - Enter submits the pending input.
    /// - CTRL+T starts dictation, or stops it while listening.
    /// - Esc dismisses the alert on screen, and closes the panel when there is
    ///   none. CTRL+C always closes it.
    /// - Arrows, page keys, CTRL+U/CTRL+D and the mouse wheel scroll.
    /// - Completion and voice outcomes from the workers are passed through.
    /// - A tick follows every 500ms of silence to animate the loading dots.
    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.terminal_events.next() => match event {
                    Some(Ok(input)) => terminal_event(input),
                    Some(Err(_)) => None,
                    None => None,
                },
                _ = time::sleep(TICK_INTERVAL) => Some(Event::UITick()),
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
