#[cfg(test)]
#[path = "noop_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::models::Event;
use crate::domain::models::VoiceCapture;
use crate::domain::models::VoiceError;
use crate::domain::models::VoiceName;

#[derive(Default)]
pub struct NoopVoice {}

#[async_trait]
impl VoiceCapture for NoopVoice {
    fn name(&self) -> VoiceName {
        return VoiceName::None;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn start(
        &self,
        _locale: &str,
        _tx: mpsc::UnboundedSender<Event>,
    ) -> Result<(), VoiceError> {
        return Err(VoiceError::Start(
            "No voice capture configured. Consider using the 'command' voice instead".to_string(),
        ));
    }

    #[allow(clippy::implicit_return)]
    async fn stop(&self) -> Result<(), VoiceError> {
        return Ok(());
    }
}
