use tui_textarea::Input;

use super::Completion;
use super::CompletionError;
use super::VoiceError;
use super::VoiceResult;

#[derive(Debug)]
pub enum Event {
    CompletionResponse(Result<Completion, CompletionError>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLT(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
    VoiceFailed(VoiceError),
    VoiceResult(VoiceResult),
    VoiceStarted(),
    VoiceStopped(),
}
