use super::CompletionRequest;

#[derive(Debug)]
pub enum Action {
    CompletionRequest(CompletionRequest),
    VoiceStart(String),
    VoiceStop(),
}
