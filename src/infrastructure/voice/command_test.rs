use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time;

use super::CommandVoice;
use crate::domain::models::Event;
use crate::domain::models::VoiceCapture;
use crate::domain::models::VoiceError;
use crate::domain::models::VoiceName;
use crate::domain::models::VoiceResult;

async fn next_event(rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<Event> {
    let event = time::timeout(Duration::from_secs(5), rx.recv()).await?;
    match event {
        Some(event) => return Ok(event),
        None => bail!("Channel closed"),
    }
}

async fn next_voice_result(rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<VoiceResult> {
    match next_event(rx).await? {
        Event::VoiceResult(res) => return Ok(res),
        _ => bail!("Wrong type from recv"),
    }
}

async fn expect_started(rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<()> {
    match next_event(rx).await? {
        Event::VoiceStarted() => return Ok(()),
        _ => bail!("Wrong type from recv"),
    }
}

async fn expect_stopped(rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<()> {
    match next_event(rx).await? {
        Event::VoiceStopped() => return Ok(()),
        _ => bail!("Wrong type from recv"),
    }
}

#[test]
fn it_is_named_command() {
    assert_eq!(CommandVoice::new("true").name(), VoiceName::Command);
}

#[tokio::test]
async fn it_fails_health_checks_without_command() {
    assert!(CommandVoice::new("  ").health_check().await.is_err());
    assert!(CommandVoice::new("true").health_check().await.is_ok());
}

#[tokio::test]
async fn it_fails_to_start_without_command() {
    let (tx, _rx) = mpsc::unbounded_channel::<Event>();
    let err = CommandVoice::new("").start("fr-FR", tx).await.unwrap_err();

    assert_eq!(
        err,
        VoiceError::Start("Voice command is not defined".to_string())
    );
}

#[tokio::test]
async fn it_sends_the_first_candidate() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let voice = CommandVoice::new("printf 'un week-end à Porto\\tun week-end a Porto\\n'");
    voice.start("fr-FR", tx).await?;

    expect_started(&mut rx).await?;
    assert_eq!(
        next_voice_result(&mut rx).await?,
        VoiceResult::Transcript("un week-end à Porto".to_string())
    );
    expect_stopped(&mut rx).await?;

    return Ok(());
}

#[tokio::test]
async fn it_exports_the_locale() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let voice = CommandVoice::new("echo \"$VOYAGE_VOICE_LOCALE\"");
    voice.start("pt-PT", tx).await?;

    expect_started(&mut rx).await?;
    assert_eq!(
        next_voice_result(&mut rx).await?,
        VoiceResult::Transcript("pt-PT".to_string())
    );

    return Ok(());
}

#[tokio::test]
async fn it_skips_lines_without_first_candidate() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let voice = CommandVoice::new("printf '\\nRome\\n'");
    voice.start("it-IT", tx).await?;

    expect_started(&mut rx).await?;
    assert_eq!(
        next_voice_result(&mut rx).await?,
        VoiceResult::Transcript("Rome".to_string())
    );

    return Ok(());
}

#[tokio::test]
async fn it_reports_recognition_failures() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let voice = CommandVoice::new("exit 3");
    voice.start("fr-FR", tx).await?;

    expect_started(&mut rx).await?;
    match next_voice_result(&mut rx).await? {
        VoiceResult::Failure(VoiceError::Recognition(_)) => (),
        _ => bail!("Expected a recognition failure"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_stops_a_running_capture() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let voice = CommandVoice::new("sleep 30");
    voice.start("fr-FR", tx.clone()).await?;
    expect_started(&mut rx).await?;

    let err = voice.start("fr-FR", tx.clone()).await.unwrap_err();
    assert_eq!(err, VoiceError::Start("Already listening".to_string()));

    time::timeout(Duration::from_secs(5), voice.stop()).await??;

    // Can listen again once stopped.
    voice.start("fr-FR", tx).await?;
    expect_started(&mut rx).await?;
    voice.stop().await?;

    return Ok(());
}

#[tokio::test]
async fn it_stops_when_nothing_is_running() -> Result<()> {
    CommandVoice::new("true").stop().await?;
    return Ok(());
}
