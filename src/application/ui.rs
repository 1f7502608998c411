use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;
#[cfg(feature = "dev")]
use tui_textarea::Input;
#[cfg(feature = "dev")]
use tui_textarea::Key;

use crate::configuration::Config;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Notification;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::TurnState;

fn centered_rect(percent_x: u16, height: u16, rect: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(rect);

    return Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1];
}

fn render_notification<B: Backend>(frame: &mut Frame<B>, notification: &Notification) {
    let area = centered_rect(60, 5, frame.size());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(notification.body.to_string())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::Red))
                    .title(format!("{} (Esc pour fermer)", notification.title)),
            ),
        area,
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = TextArea::default();

    #[cfg(feature = "dev")]
    {
        let test_str = "Je cherche une destination ensoleillée pour un long week-end en mai, plutôt en Europe.";
        for char in test_str.chars() {
            textarea.input(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
            });
        }
    }

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Max(4)])
                .split(frame.size());

            if layout[0].width != app_state.last_known_width
                || layout[0].height != app_state.last_known_height
            {
                app_state.set_rect(layout[0]);
            }

            app_state
                .bubble_list
                .render(frame, layout[0], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            if app_state.conversation.turn_state() == TurnState::AwaitingRemote {
                app_state.loading.render(frame, layout[1]);
            } else {
                frame.render_widget(textarea.widget(), layout[1]);
            }

            if let Some(notification) = &app_state.notification {
                render_notification(frame, notification);
            }
        })?;

        match events.next().await? {
            Event::CompletionResponse(res) => {
                app_state.handle_completion(res);
            }
            Event::KeyboardCharInput(input) => {
                if app_state.conversation.is_awaiting_response() {
                    continue;
                }
                textarea.input(input);
                app_state
                    .conversation
                    .set_pending_input(&textarea.lines().join("\n"));
            }
            Event::KeyboardPaste(text) => {
                if app_state.conversation.is_awaiting_response() {
                    continue;
                }
                for char in text.chars() {
                    match char {
                        '\r' => (),
                        '\n' => textarea.insert_newline(),
                        _ => textarea.insert_char(char),
                    }
                }
                app_state
                    .conversation
                    .set_pending_input(&textarea.lines().join("\n"));
            }
            Event::KeyboardEnter() => {
                let input_str = textarea.lines().join("\n");
                if app_state.submit(&input_str, &tx)? {
                    textarea =
                        TextArea::with_text("", app_state.conversation.is_capturing_voice());
                }
            }
            Event::KeyboardCTRLT() => {
                app_state.toggle_voice(&tx)?;
            }
            Event::KeyboardEsc() => {
                if !app_state.dismiss_notification() {
                    break;
                }
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::UIResize() => (),
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {
                app_state.tick();
            }
            Event::VoiceFailed(err) => {
                app_state.handle_voice_failed(&err);
                textarea.set_block(TextArea::block(
                    app_state.conversation.is_capturing_voice(),
                ));
            }
            Event::VoiceResult(res) => {
                app_state.handle_voice_result(res);
                textarea = TextArea::with_text(
                    app_state.conversation.pending_input(),
                    app_state.conversation.is_capturing_voice(),
                );
            }
            Event::VoiceStarted() => {
                app_state.handle_voice_started();
                textarea.set_block(TextArea::block(true));
            }
            Event::VoiceStopped() => {
                app_state.handle_voice_stopped();
                textarea.set_block(TextArea::block(false));
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    config: &Config,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut stdout = io::stdout();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut app_state = AppState::new(config);

    let res = start_loop(&mut terminal, &mut app_state, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
