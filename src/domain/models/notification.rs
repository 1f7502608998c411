use super::CompletionError;
use super::VoiceError;

/// A user facing alert shown on top of the chat panel until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn error(body: &str) -> Notification {
        return Notification {
            title: "Erreur".to_string(),
            body: body.to_string(),
        };
    }
}

impl From<&CompletionError> for Notification {
    fn from(_err: &CompletionError) -> Notification {
        return Notification::error(
            "Une erreur est survenue lors de la communication avec l'assistant",
        );
    }
}

impl From<&VoiceError> for Notification {
    fn from(err: &VoiceError) -> Notification {
        match err {
            VoiceError::Start(_) => {
                return Notification::error("Impossible de démarrer la reconnaissance vocale");
            }
            VoiceError::Stop(_) => {
                return Notification::error("Impossible d'arrêter la reconnaissance vocale");
            }
            VoiceError::Recognition(_) => {
                return Notification::error(
                    "Une erreur est survenue lors de la reconnaissance vocale",
                );
            }
        }
    }
}
