#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use chrono::Utc;
use uuid::Uuid;

use super::sanitize;
use crate::domain::models::Completion;
use crate::domain::models::CompletionError;
use crate::domain::models::CompletionRequest;
use crate::domain::models::Message;
use crate::domain::models::Notification;
use crate::domain::models::VoiceError;
use crate::domain::models::VoiceResult;

pub const DEFAULT_GREETING: &str = "Bonjour ! Je suis votre assistant de voyage. Comment puis-je vous aider à trouver votre prochaine destination ?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingRemote,
}

/// Owns the chat history of a single panel session. Every mutation of the
/// message list and of the in-flight flag goes through this type.
///
/// Messages are append-only, and at most one request to the assistant is in
/// flight at a time.
pub struct Conversation {
    messages: Vec<Message>,
    pending_input: String,
    awaiting_response: bool,
    capturing_voice: bool,
    user_tag: String,
    last_id: i64,
}

impl Conversation {
    pub fn new(greeting: &str) -> Conversation {
        return Conversation {
            messages: vec![Message::assistant("1", greeting)],
            pending_input: "".to_string(),
            awaiting_response: false,
            capturing_voice: false,
            user_tag: format!("user-{}", Uuid::new_v4()),
            last_id: 0,
        };
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn pending_input(&self) -> &str {
        return &self.pending_input;
    }

    pub fn user_tag(&self) -> &str {
        return &self.user_tag;
    }

    pub fn is_awaiting_response(&self) -> bool {
        return self.awaiting_response;
    }

    pub fn is_capturing_voice(&self) -> bool {
        return self.capturing_voice;
    }

    pub fn turn_state(&self) -> TurnState {
        if self.awaiting_response {
            return TurnState::AwaitingRemote;
        }

        return TurnState::Idle;
    }

    pub fn set_pending_input(&mut self, text: &str) {
        self.pending_input = text.to_string();
    }

    /// Sends whatever is currently pending.
    pub fn submit(&mut self) -> Option<CompletionRequest> {
        let text = self.pending_input.to_string();
        return self.append_user_turn(&text);
    }

    /// Appends the user's turn and returns the request to forward to the
    /// assistant. Returns `None` without touching any state when the text is
    /// blank or a request is already in flight.
    pub fn append_user_turn(&mut self, text: &str) -> Option<CompletionRequest> {
        if text.trim().is_empty() || self.awaiting_response {
            return None;
        }

        let id = self.next_id();
        self.messages.push(Message::user(&id, text));
        self.pending_input = "".to_string();
        self.awaiting_response = true;

        return Some(CompletionRequest::new(text, &self.user_tag));
    }

    pub fn append_assistant_turn(&mut self, message: Message) {
        self.messages.push(message);
        self.awaiting_response = false;
    }

    /// Ends the in-flight turn without an answer. The user's turn stays in the
    /// history.
    pub fn fail_turn(&mut self, err: &CompletionError) -> Notification {
        tracing::error!(error = ?err, kind = ?err.kind(), "Completion failed");
        self.awaiting_response = false;

        return Notification::from(err);
    }

    /// Applies the outcome of the in-flight request. Outcomes arriving while
    /// nothing is in flight are discarded.
    pub fn handle_completion(
        &mut self,
        res: Result<Completion, CompletionError>,
    ) -> Option<Notification> {
        if !self.awaiting_response {
            tracing::warn!("Discarding completion received while idle");
            return None;
        }

        match res {
            Ok(completion) => {
                let id = match completion.message_id {
                    Some(message_id) if !message_id.is_empty() => message_id,
                    _ => self.next_id(),
                };

                let message = Message::assistant(&id, &sanitize(&completion.answer))
                    .with_usage(completion.usage);
                tracing::debug!(id = %message.id, usage = ?message.usage(), "Assistant turn appended");
                self.append_assistant_turn(message);

                return None;
            }
            Err(err) => {
                return Some(self.fail_turn(&err));
            }
        }
    }

    pub fn voice_started(&mut self) {
        self.capturing_voice = true;
    }

    pub fn voice_stopped(&mut self) {
        self.capturing_voice = false;
    }

    /// Start and stop failures leave the capture flag as it was before the
    /// attempt. A recognition failure ends the capture.
    pub fn voice_failed(&mut self, err: &VoiceError) -> Notification {
        tracing::error!(error = ?err, "Voice capture failed");
        if let VoiceError::Recognition(_) = err {
            self.capturing_voice = false;
        }

        return Notification::from(err);
    }

    /// A transcript replaces the pending input wholesale, whatever was typed
    /// in the meantime.
    pub fn apply_voice_result(&mut self, res: VoiceResult) -> Option<Notification> {
        match res {
            VoiceResult::Transcript(text) => {
                self.pending_input = text;
                return None;
            }
            VoiceResult::Failure(err) => {
                return Some(self.voice_failed(&err));
            }
        }
    }

    fn next_id(&mut self) -> String {
        let mut id = Utc::now().timestamp_millis();
        if id <= self.last_id {
            id = self.last_id + 1;
        }
        self.last_id = id;

        return id.to_string();
    }
}

impl Default for Conversation {
    fn default() -> Conversation {
        return Conversation::new(DEFAULT_GREETING);
    }
}
