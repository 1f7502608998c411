#[cfg(test)]
#[path = "voice_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use thiserror::Error;
use tokio::sync::mpsc;

use super::Event;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum VoiceName {
    Command,
    None,
}

impl VoiceName {
    pub fn parse(text: String) -> Option<VoiceName> {
        return VoiceName::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Unable to start voice capture: {0}")]
    Start(String),

    #[error("Unable to stop voice capture: {0}")]
    Stop(String),

    #[error("Speech recognition failed: {0}")]
    Recognition(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoiceResult {
    /// Best guess of the recognizer, the first candidate of its ranked list.
    Transcript(String),
    Failure(VoiceError),
}

impl VoiceResult {
    /// Builds a result from a ranked candidate list. Only the first candidate
    /// is considered, and an empty one yields nothing.
    pub fn from_candidates(candidates: &[&str]) -> Option<VoiceResult> {
        return candidates
            .first()
            .filter(|e| return !e.is_empty())
            .map(|e| return VoiceResult::Transcript(e.to_string()));
    }
}

#[async_trait]
pub trait VoiceCapture {
    /// Returns the name of the voice capture adapter.
    fn name(&self) -> VoiceName;

    /// Used at startup to verify the adapter can be started at all.
    async fn health_check(&self) -> Result<()>;

    /// Resolves once capture has begun, after `Event::VoiceStarted` has been
    /// sent through `tx`. Transcripts and recognition failures follow as
    /// `Event::VoiceResult`, and a recognizer ending on its own sends
    /// `Event::VoiceStopped`.
    async fn start(
        &self,
        locale: &str,
        tx: mpsc::UnboundedSender<Event>,
    ) -> std::result::Result<(), VoiceError>;

    /// Resolves once capture has ended.
    async fn stop(&self) -> std::result::Result<(), VoiceError>;
}

pub type VoiceBox = Box<dyn VoiceCapture + Send + Sync>;
