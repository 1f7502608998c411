#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::CompletionClientBox;
use crate::domain::models::CompletionRequest;
use crate::domain::models::Event;
use crate::domain::models::VoiceBox;

fn complete(
    client: Arc<CompletionClientBox>,
    request: CompletionRequest,
    tx: mpsc::UnboundedSender<Event>,
) {
    tokio::spawn(async move {
        let res = client.complete(request).await;
        if tx.send(Event::CompletionResponse(res)).is_err() {
            tracing::debug!("Chat closed before the assistant answered");
        }
    });
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs side effects requested by the UI until the action channel closes.
    /// Completions run on their own task so voice actions are never blocked
    /// behind a slow assistant.
    pub async fn start(
        client: CompletionClientBox,
        voice: VoiceBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let client = Arc::new(client);

        loop {
            let action = match rx.recv().await {
                Some(action) => action,
                None => return Ok(()),
            };

            match action {
                Action::CompletionRequest(request) => {
                    tracing::debug!(user = %request.user, "Sending completion request");
                    complete(client.clone(), request, tx.clone());
                }
                Action::VoiceStart(locale) => {
                    if let Err(err) = voice.start(&locale, tx.clone()).await {
                        tx.send(Event::VoiceFailed(err))?;
                    }
                }
                Action::VoiceStop() => match voice.stop().await {
                    Ok(()) => tx.send(Event::VoiceStopped())?,
                    Err(err) => tx.send(Event::VoiceFailed(err))?,
                },
            }
        }
    }
}
