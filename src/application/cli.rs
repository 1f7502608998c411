use std::io;
use std::path;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::VoiceName;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Enter - Send your message to the assistant.
- CTRL+T - Start or stop dictating your message.
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- Esc - Dismiss an alert, otherwise close the chat.
- CTRL+C - Close the chat.

VOICE:
With `--voice command`, Voyage runs `--voice-command` through `sh -c` when you start dictating. The locale is exported as VOYAGE_VOICE_LOCALE. Each line the command prints is a tab separated list of transcripts, best first, and the best one replaces your message.
        "#;

    return text.trim().to_string();
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone())
        .await
        .with_context(|| return format!("Failed to create {config_file_path_str}"))?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Open the travel assistant chat. This is the default.");
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") || line.starts_with("VOICE:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("voyage")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("VOYAGE_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::DifyURL.to_string())
                .long(ConfigKey::DifyURL.to_string())
                .env("VOYAGE_DIFY_URL")
                .num_args(1)
                .help(format!("Base URL of the Dify compatible assistant API. [default: {}]", Config::default(ConfigKey::DifyURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::DifyToken.to_string())
                .long(ConfigKey::DifyToken.to_string())
                .env("VOYAGE_DIFY_TOKEN")
                .num_args(1)
                .help("API key of the Dify app, sent as a bearer token.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::CompletionTimeout.to_string())
                .long(ConfigKey::CompletionTimeout.to_string())
                .env("VOYAGE_COMPLETION_TIMEOUT")
                .num_args(1)
                .help("Time to wait in milliseconds for the assistant to answer. Waits indefinitely when unset.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Greeting.to_string())
                .long(ConfigKey::Greeting.to_string())
                .env("VOYAGE_GREETING")
                .num_args(1)
                .help("First message shown by the assistant when the chat opens. It is never sent to the API.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Voice.to_string())
                .short('v')
                .long(ConfigKey::Voice.to_string())
                .env("VOYAGE_VOICE")
                .num_args(1)
                .help(format!("Speech to text integration used for dictation. [default: {}]", Config::default(ConfigKey::Voice)))
                .value_parser(PossibleValuesParser::new(VoiceName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::VoiceCommand.to_string())
                .long(ConfigKey::VoiceCommand.to_string())
                .env("VOYAGE_VOICE_COMMAND")
                .num_args(1)
                .help("Shell command printing transcripts when using the command voice integration.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::VoiceLocale.to_string())
                .short('l')
                .long(ConfigKey::VoiceLocale.to_string())
                .env("VOYAGE_VOICE_LOCALE")
                .num_args(1)
                .help(format!("Locale requested from the speech to text integration. [default: {}]", Config::default(ConfigKey::VoiceLocale)))
                .global(true),
        );
}

/// Returns the loaded configuration when the chat should open, or `None` when
/// a subcommand already did all the work.
pub async fn parse() -> Result<Option<Config>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            let config = Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(config));
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        _ => {
            let config = Config::load(build(), vec![&matches]).await?;
            return Ok(Some(config));
        }
    }
}
