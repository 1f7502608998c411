#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::collections::HashMap;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::VoiceName;
use crate::domain::services::DEFAULT_GREETING;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    CompletionTimeout,
    ConfigFile,
    DifyToken,
    DifyURL,
    Greeting,
    Voice,
    VoiceCommand,
    VoiceLocale,
}

/// Settings resolved from defaults, the config file, environment variables and
/// CLI flags, in increasing order of precedence. Passed down explicitly to
/// whatever needs it.
#[derive(Clone, Debug)]
pub struct Config {
    values: HashMap<ConfigKey, String>,
}

impl Config {
    pub fn with_defaults() -> Config {
        let mut config = Config {
            values: HashMap::new(),
        };
        for key in ConfigKey::iter() {
            config.set(key, &Config::default(key));
        }

        return config;
    }

    pub fn get(&self, key: ConfigKey) -> String {
        if let Some(val) = self.values.get(&key) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) {
        self.values.insert(key, value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let default_voice = VoiceName::None.to_string();

        let config_path = dirs::config_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("voyage/config.toml");

        let res: &str = match key {
            ConfigKey::CompletionTimeout => "",
            ConfigKey::DifyToken => "",
            ConfigKey::DifyURL => "https://api.dify.ai/v1",
            ConfigKey::Greeting => DEFAULT_GREETING,
            ConfigKey::Voice => &default_voice,
            ConfigKey::VoiceCommand => "",
            ConfigKey::VoiceLocale => "fr-FR",

            // Special
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
        };

        return res.to_string();
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<Config> {
        let mut config = Config::with_defaults();

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    {
                        possible_values = arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    }

                    if let Some(val_int) = val.as_integer() {
                        config.set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        config.set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    config.set(key, val)
                }
            }
        }

        tracing::debug!(
            dify_url = config.get(ConfigKey::DifyURL),
            completion_timeout = config.get(ConfigKey::CompletionTimeout),
            voice = config.get(ConfigKey::Voice),
            voice_locale = config.get(ConfigKey::VoiceLocale),
            "config"
        );

        return Ok(config);
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i32>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = {}", toml_edit::value(val));
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
