#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use std::process::Stdio;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::process::Child;
use tokio::process::ChildStdout;
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::sync::Mutex;

use crate::domain::models::Event;
use crate::domain::models::VoiceCapture;
use crate::domain::models::VoiceError;
use crate::domain::models::VoiceName;
use crate::domain::models::VoiceResult;

type StopAck = oneshot::Sender<Result<(), VoiceError>>;

/// Runs an external speech to text program through `sh -c`. The requested
/// locale is exported as `VOYAGE_VOICE_LOCALE`. Every line printed on stdout
/// is a tab separated list of candidates, best first.
pub struct CommandVoice {
    command: String,
    running: Mutex<Option<oneshot::Sender<StopAck>>>,
}

impl CommandVoice {
    pub fn new(command: &str) -> CommandVoice {
        return CommandVoice {
            command: command.trim().to_string(),
            running: Mutex::new(None),
        };
    }
}

async fn capture(
    mut child: Child,
    stdout: ChildStdout,
    mut stop_rx: oneshot::Receiver<StopAck>,
    tx: mpsc::UnboundedSender<Event>,
) {
    let mut lines = BufReader::new(stdout).lines();

    loop {
        tokio::select! {
            ack = &mut stop_rx => {
                let res = child
                    .kill()
                    .await
                    .map_err(|err| return VoiceError::Stop(err.to_string()));
                if let Ok(ack) = ack {
                    let _ = ack.send(res);
                }
                return;
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let candidates = line.split('\t').collect::<Vec<&str>>();
                        if let Some(res) = VoiceResult::from_candidates(&candidates) {
                            tracing::debug!(transcript = ?res, "Voice transcript");
                            if tx.send(Event::VoiceResult(res)).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        tracing::error!(error = ?err, "Failed to read voice command output");
                        break;
                    }
                }
            }
        }
    }

    let event = match child.wait().await {
        Ok(status) if status.success() => Event::VoiceStopped(),
        Ok(status) => Event::VoiceResult(VoiceResult::Failure(VoiceError::Recognition(
            status.to_string(),
        ))),
        Err(err) => Event::VoiceResult(VoiceResult::Failure(VoiceError::Recognition(
            err.to_string(),
        ))),
    };

    let _ = tx.send(event);
}

#[async_trait]
impl VoiceCapture for CommandVoice {
    fn name(&self) -> VoiceName {
        return VoiceName::Command;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.command.is_empty() {
            bail!("Voice command is not defined");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn start(&self, locale: &str, tx: mpsc::UnboundedSender<Event>) -> Result<(), VoiceError> {
        if self.command.is_empty() {
            return Err(VoiceError::Start("Voice command is not defined".to_string()));
        }

        let mut running = self.running.lock().await;
        if let Some(stop_tx) = running.as_ref() {
            if !stop_tx.is_closed() {
                return Err(VoiceError::Start("Already listening".to_string()));
            }
        }

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .env("VOYAGE_VOICE_LOCALE", locale)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| return VoiceError::Start(err.to_string()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| return VoiceError::Start("No stdout for voice command".to_string()))?;

        tracing::debug!(command = %self.command, locale = locale, "Voice capture started");

        // Announced before any transcript can be read.
        let _ = tx.send(Event::VoiceStarted());

        let (stop_tx, stop_rx) = oneshot::channel::<StopAck>();
        tokio::spawn(capture(child, stdout, stop_rx, tx));
        *running = Some(stop_tx);

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn stop(&self) -> Result<(), VoiceError> {
        let stop_tx = self.running.lock().await.take();
        let stop_tx = match stop_tx {
            Some(stop_tx) => stop_tx,
            None => return Ok(()),
        };

        let (ack_tx, ack_rx) = oneshot::channel::<Result<(), VoiceError>>();
        if stop_tx.send(ack_tx).is_err() {
            // Already exited on its own.
            return Ok(());
        }

        match ack_rx.await {
            Ok(res) => return res,
            Err(_) => return Ok(()),
        }
    }
}
