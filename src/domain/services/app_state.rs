#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::Conversation;
use super::Scroll;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Completion;
use crate::domain::models::CompletionError;
use crate::domain::models::Loading;
use crate::domain::models::Notification;
use crate::domain::models::VoiceError;
use crate::domain::models::VoiceResult;

/// Everything the chat panel renders. Owned by the UI task, which is the only
/// writer.
pub struct AppState<'a> {
    pub bubble_list: BubbleList<'a>,
    pub conversation: Conversation,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub loading: Loading,
    pub notification: Option<Notification>,
    pub scroll: Scroll,
    pub voice_locale: String,
    voice_starting: bool,
}

impl<'a> AppState<'a> {
    pub fn new(config: &Config) -> AppState<'a> {
        let greeting = config.get(ConfigKey::Greeting);
        let conversation = if greeting.trim().is_empty() {
            Conversation::default()
        } else {
            Conversation::new(&greeting)
        };

        return AppState {
            bubble_list: BubbleList::default(),
            conversation,
            last_known_height: 0,
            last_known_width: 0,
            loading: Loading::default(),
            notification: None,
            scroll: Scroll::default(),
            voice_locale: config.get(ConfigKey::VoiceLocale),
            voice_starting: false,
        };
    }

    /// Sends the text to the assistant. Returns false when nothing was sent,
    /// either because the text is blank or a reply is still pending.
    pub fn submit(&mut self, text: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        self.conversation.set_pending_input(text);
        let request = match self.conversation.submit() {
            Some(request) => request,
            None => return Ok(false),
        };

        tx.send(Action::CompletionRequest(request))?;
        self.loading.reset();
        self.sync_dependants();
        self.scroll.last();

        return Ok(true);
    }

    /// Starts or stops dictation. Presses made while a start is still being
    /// acknowledged are ignored, so a single capture is ever started.
    pub fn toggle_voice(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.voice_starting {
            return Ok(());
        }

        if self.conversation.is_capturing_voice() {
            tx.send(Action::VoiceStop())?;
        } else {
            tx.send(Action::VoiceStart(self.voice_locale.to_string()))?;
            self.voice_starting = true;
        }

        return Ok(());
    }

    pub fn handle_completion(&mut self, res: Result<Completion, CompletionError>) {
        if let Some(notification) = self.conversation.handle_completion(res) {
            self.notification = Some(notification);
        }

        self.sync_dependants();
        self.scroll.last();
    }

    pub fn handle_voice_started(&mut self) {
        self.voice_starting = false;
        self.conversation.voice_started();
    }

    pub fn handle_voice_stopped(&mut self) {
        self.voice_starting = false;
        self.conversation.voice_stopped();
    }

    pub fn handle_voice_failed(&mut self, err: &VoiceError) {
        self.voice_starting = false;
        self.notification = Some(self.conversation.voice_failed(err));
    }

    pub fn handle_voice_result(&mut self, res: VoiceResult) {
        self.voice_starting = false;
        if let Some(notification) = self.conversation.apply_voice_result(res) {
            self.notification = Some(notification);
        }
    }

    /// Returns true when there was an alert to dismiss.
    pub fn dismiss_notification(&mut self) -> bool {
        return self.notification.take().is_some();
    }

    pub fn tick(&mut self) {
        if self.conversation.is_awaiting_response() {
            self.loading.tick();
        }
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        let was_at_bottom = self.scroll.is_at_bottom();

        self.bubble_list
            .set_messages(self.conversation.messages(), self.last_known_width.into());

        let lines_len = u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX);
        self.scroll.set_state(lines_len, self.last_known_height);

        if was_at_bottom || self.conversation.is_awaiting_response() {
            self.scroll.last();
        }
    }
}
