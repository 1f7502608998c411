pub mod command;
pub mod noop;

use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::VoiceBox;
use crate::domain::models::VoiceName;

pub struct VoiceManager {}

impl VoiceManager {
    pub fn get(name: VoiceName, config: &Config) -> Result<VoiceBox> {
        if name == VoiceName::Command {
            return Ok(Box::new(command::CommandVoice::new(
                &config.get(ConfigKey::VoiceCommand),
            )));
        }

        return Ok(Box::<noop::NoopVoice>::default());
    }
}
