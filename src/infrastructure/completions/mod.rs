pub mod dify;

use anyhow::Result;

use crate::configuration::Config;
use crate::domain::models::CompletionClientBox;

pub struct CompletionManager {}

impl CompletionManager {
    pub fn get(config: &Config) -> Result<CompletionClientBox> {
        let dify_config = dify::DifyConfig::from_config(config)?;
        return Ok(Box::new(dify::Dify::new(dify_config)));
    }
}
