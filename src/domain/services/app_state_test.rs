use anyhow::bail;
use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::AppState;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Completion;
use crate::domain::models::CompletionError;
use crate::domain::models::Notification;
use crate::domain::models::VoiceError;
use crate::domain::models::VoiceResult;
use crate::domain::services::DEFAULT_GREETING;

fn app_state() -> AppState<'static> {
    let mut app_state = AppState::new(&Config::with_defaults());
    app_state.set_rect(Rect::new(0, 0, 50, 10));
    return app_state;
}

fn answer(text: &str) -> Completion {
    return Completion {
        answer: text.to_string(),
        message_id: Some("9da23599".to_string()),
        usage: None,
    };
}

#[test]
fn it_greets_with_the_default_greeting() {
    let app_state = app_state();
    let messages = app_state.conversation.messages();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, DEFAULT_GREETING);
    assert_eq!(app_state.voice_locale, "fr-FR");
}

#[test]
fn it_greets_with_a_configured_greeting() {
    let mut config = Config::with_defaults();
    config.set(ConfigKey::Greeting, "Hola !");
    config.set(ConfigKey::VoiceLocale, "es-ES");
    let app_state = AppState::new(&config);

    assert_eq!(app_state.conversation.messages()[0].text, "Hola !");
    assert_eq!(app_state.voice_locale, "es-ES");
}

#[test]
fn it_submits_messages() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    assert!(app_state.submit("Bonjour", &tx)?);
    assert!(app_state.conversation.is_awaiting_response());
    assert_eq!(app_state.conversation.messages().len(), 2);

    match rx.try_recv()? {
        Action::CompletionRequest(request) => {
            assert_eq!(request.query, "Bonjour");
            assert_eq!(request.user, app_state.conversation.user_tag());
        }
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}

#[test]
fn it_ignores_blank_submissions() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    assert!(!app_state.submit("   \n", &tx)?);
    assert_eq!(app_state.conversation.messages().len(), 1);
    assert!(rx.try_recv().is_err());

    return Ok(());
}

#[test]
fn it_ignores_submissions_while_awaiting() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state.submit("Bonjour", &tx)?;
    rx.try_recv()?;

    assert!(!app_state.submit("Encore", &tx)?);
    assert_eq!(app_state.conversation.messages().len(), 2);
    assert!(rx.try_recv().is_err());

    return Ok(());
}

#[test]
fn it_appends_sanitized_answers() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state.submit("Bonjour", &tx)?;
    app_state.handle_completion(Ok(answer("<think>reasoning</think>Salut !")));

    let messages = app_state.conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].text, "Salut !");
    assert_eq!(messages[2].id, "9da23599");
    assert!(!app_state.conversation.is_awaiting_response());
    assert!(app_state.notification.is_none());
    assert!(app_state.scroll.is_at_bottom());

    return Ok(());
}

#[test]
fn it_notifies_on_completion_failures() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state.submit("Bonjour", &tx)?;
    app_state.handle_completion(Err(CompletionError::EmptyAnswer));

    assert_eq!(app_state.conversation.messages().len(), 2);
    assert!(!app_state.conversation.is_awaiting_response());
    assert_eq!(
        app_state.notification,
        Some(Notification::error(
            "Une erreur est survenue lors de la communication avec l'assistant"
        ))
    );

    assert!(app_state.dismiss_notification());
    assert!(!app_state.dismiss_notification());

    return Ok(());
}

#[test]
fn it_animates_only_while_awaiting() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state.tick();
    assert_eq!(app_state.loading.text(), "");

    app_state.submit("Bonjour", &tx)?;
    app_state.tick();
    app_state.tick();
    assert_eq!(app_state.loading.text(), "..");

    return Ok(());
}

#[test]
fn it_toggles_voice() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state.toggle_voice(&tx)?;
    match rx.try_recv()? {
        Action::VoiceStart(locale) => assert_eq!(locale, "fr-FR"),
        _ => bail!("Wrong enum"),
    }

    app_state.handle_voice_started();
    app_state.toggle_voice(&tx)?;
    match rx.try_recv()? {
        Action::VoiceStop() => (),
        _ => bail!("Wrong enum"),
    }

    app_state.handle_voice_stopped();
    assert!(!app_state.conversation.is_capturing_voice());

    return Ok(());
}

#[test]
fn it_ignores_toggles_until_voice_has_started() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state.toggle_voice(&tx)?;
    app_state.toggle_voice(&tx)?;
    match rx.try_recv()? {
        Action::VoiceStart(_) => (),
        _ => bail!("Wrong enum"),
    }
    assert!(rx.try_recv().is_err());

    app_state.handle_voice_started();
    app_state.toggle_voice(&tx)?;
    match rx.try_recv()? {
        Action::VoiceStop() => (),
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}

#[test]
fn it_allows_a_new_start_after_a_failed_one() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state.toggle_voice(&tx)?;
    app_state.handle_voice_failed(&VoiceError::Start("microphone busy".to_string()));
    app_state.toggle_voice(&tx)?;

    let mut starts = 0;
    while let Ok(action) = rx.try_recv() {
        if let Action::VoiceStart(_) = action {
            starts += 1;
        }
    }
    assert_eq!(starts, 2);
    assert!(!app_state.conversation.is_capturing_voice());

    return Ok(());
}

#[test]
fn it_replaces_pending_input_with_transcripts() {
    let mut app_state = app_state();
    app_state.conversation.set_pending_input("Paris");
    app_state.handle_voice_started();
    app_state.handle_voice_result(VoiceResult::Transcript("un week-end à Porto".to_string()));

    assert_eq!(app_state.conversation.pending_input(), "un week-end à Porto");
    assert!(app_state.conversation.is_capturing_voice());
    assert!(app_state.notification.is_none());
}

#[test]
fn it_notifies_on_voice_failures() {
    let mut app_state = app_state();
    app_state.handle_voice_failed(&VoiceError::Start("No voice capture configured".to_string()));

    assert!(!app_state.conversation.is_capturing_voice());
    assert_eq!(
        app_state.notification,
        Some(Notification::error(
            "Impossible de démarrer la reconnaissance vocale"
        ))
    );
}

#[test]
fn it_follows_new_messages_only_from_the_bottom() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    for idx in 0..3 {
        app_state.submit(&format!("Question {idx}"), &tx)?;
        app_state.handle_completion(Ok(answer("Réponse")));
    }
    assert!(app_state.scroll.is_at_bottom());

    app_state.scroll.up_page();
    assert!(!app_state.scroll.is_at_bottom());

    app_state.set_rect(Rect::new(0, 0, 50, 10));
    assert!(!app_state.scroll.is_at_bottom());

    return Ok(());
}
