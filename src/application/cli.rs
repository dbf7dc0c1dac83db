use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::log_dir;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::configuration::VOICES;
use crate::domain::models::PricingPlan;
use crate::domain::models::SessionType;
use crate::domain::models::Therapist;
use crate::domain::services::plans::select_plan;
use crate::domain::services::UserStore;
use crate::infrastructure::payments::PaymentsManager;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Up/Down arrow - Move through menus, scroll the chat
- Enter - Pick a menu entry, send your message
- Esc - Go back to the previous screen
- CTRL+R - Start recording a voice message, press again to stop and send it
- CTRL+P - Play the therapist's last voice reply
- CTRL+S - Stop playback
- PageUp/PageDown - Scroll the chat a page at a time
- CTRL+C - Exit Desabafa.
        "#;

    return text.trim().to_string();
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
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

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

pub fn format_therapists() -> String {
    return Therapist::all()
        .iter()
        .map(|therapist| {
            return format!(
                "- {} {} ({}) - {}\n  {}\n  Personalidade: {}\n  Especialidades: {}",
                therapist.icon,
                therapist.name,
                therapist.id,
                therapist.title,
                therapist.description,
                therapist.personality,
                therapist.specialties.join(", ")
            );
        })
        .collect::<Vec<String>>()
        .join("\n\n");
}

pub fn format_session_types() -> String {
    return SessionType::all()
        .iter()
        .map(|session_type| {
            return format!(
                "- {} ({}) - {}",
                session_type.name, session_type.id, session_type.description
            );
        })
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn format_plans() -> String {
    return PricingPlan::all()
        .iter()
        .map(|plan| {
            let mut res = format!(
                "- {} ({}) - {}{}",
                plan.name, plan.id, plan.price, plan.period
            );
            if plan.popular {
                res = format!("{res} [Mais popular]");
            }
            res = format!("{res}\n  {}", plan.description);

            for feature in plan.features {
                res = format!("{res}\n  + {feature}");
            }
            for limitation in plan.limitations {
                res = format!("{res}\n  - {limitation}");
            }

            return res;
        })
        .collect::<Vec<String>>()
        .join("\n\n");
}

async fn print_user() -> Result<()> {
    let user_op = UserStore::default().load().await?;
    if let Some(user) = user_op {
        println!(
            "ID: {}\nConta: {}\nPlano: {}\nSessões restantes: {}",
            user.id,
            user.display_name(),
            user.plan_label(),
            user.sessions_remaining_label()
        );
    } else {
        println!("Nenhum usuário salvo. Um usuário anônimo é criado na primeira conversa.");
    }

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

fn subcommand_catalog() -> Command {
    return Command::new("catalog")
        .about("Lists the therapists, session types and plans on offer.")
        .subcommand(Command::new("therapists").about("List the virtual therapists."))
        .subcommand(Command::new("session-types").about("List the session types."))
        .subcommand(Command::new("plans").about("List the pricing plans."));
}

fn subcommand_plans() -> Command {
    return Command::new("plans")
        .about("Pricing plans.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("select")
                .about("Select a plan and continue to payment.")
                .arg(
                    Arg::new("plan-id")
                        .help("ID of the plan, as listed by `catalog plans`.")
                        .required(true),
                ),
        );
}

fn subcommand_user() -> Command {
    return Command::new("user")
        .about("Manage the user saved on this machine.")
        .arg_required_else_help(true)
        .subcommand(Command::new("show").about("Show the saved user."))
        .subcommand(
            Command::new("clear")
                .about("Forget the saved user. A new anonymous user is created on the next chat."),
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for Desabafa")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Desabafa with environment variable RUST_LOG=desabafa")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start the chat. This is the default command.");
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiURL.to_string())
        .short('u')
        .long(ConfigKey::ApiURL.to_string())
        .env("DESABAFA_API_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the Desabafa.AI backend. [default: {}]",
            Config::default(ConfigKey::ApiURL)
        ))
        .global(true);
}

fn arg_generate_audio() -> Arg {
    return Arg::new(ConfigKey::GenerateAudio.to_string())
        .long(ConfigKey::GenerateAudio.to_string())
        .env("DESABAFA_GENERATE_AUDIO")
        .num_args(1)
        .help(format!(
            "Ask the backend to synthesize speech for every reply. [default: {}]",
            Config::default(ConfigKey::GenerateAudio)
        ))
        .value_parser(PossibleValuesParser::new(["true", "false"]))
        .global(true);
}

fn arg_voice() -> Arg {
    return Arg::new(ConfigKey::Voice.to_string())
        .long(ConfigKey::Voice.to_string())
        .env("DESABAFA_VOICE")
        .num_args(1)
        .help(format!(
            "Voice used for synthesized replies. [default: {}]",
            Config::default(ConfigKey::Voice)
        ))
        .value_parser(PossibleValuesParser::new(VOICES))
        .global(true);
}

fn arg_recorder() -> Arg {
    return Arg::new(ConfigKey::Recorder.to_string())
        .long(ConfigKey::Recorder.to_string())
        .env("DESABAFA_RECORDER")
        .num_args(1)
        .help(format!(
            "Command used to record voice messages. The output file path is appended as the last argument, 'none' disables recording. [default: {}]",
            Config::default(ConfigKey::Recorder)
        ))
        .global(true);
}

fn arg_player() -> Arg {
    return Arg::new(ConfigKey::Player.to_string())
        .long(ConfigKey::Player.to_string())
        .env("DESABAFA_PLAYER")
        .num_args(1)
        .help(format!(
            "Command used to play synthesized replies. The audio URL is appended as the last argument, 'none' disables playback. [default: {}]",
            Config::default(ConfigKey::Player)
        ))
        .global(true);
}

fn arg_request_timeout() -> Arg {
    return Arg::new(ConfigKey::RequestTimeout.to_string())
        .long(ConfigKey::RequestTimeout.to_string())
        .env("DESABAFA_REQUEST_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time in milliseconds before a request to the backend is considered failed. [default: {}]",
            Config::default(ConfigKey::RequestTimeout)
        ))
        .global(true);
}

fn arg_user_file() -> Arg {
    return Arg::new(ConfigKey::UserFile.to_string())
        .long(ConfigKey::UserFile.to_string())
        .env("DESABAFA_USER_FILE")
        .num_args(1)
        .help(format!(
            "Path to the file keeping the saved user. [default: {}]",
            Config::default(ConfigKey::UserFile)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
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
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("desabafa")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_catalog())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(subcommand_plans())
        .subcommand(subcommand_user())
        .arg(arg_api_url())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("DESABAFA_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(arg_generate_audio())
        .arg(arg_player())
        .arg(arg_recorder())
        .arg(arg_request_timeout())
        .arg(arg_user_file())
        .arg(arg_voice());
}

async fn load_config(matches: &ArgMatches, subcmd_matches: &ArgMatches) -> Result<()> {
    return Config::load(build(), vec![matches, subcmd_matches]).await;
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            load_config(&matches, subcmd_matches).await?;
        }
        Some(("catalog", subcmd_matches)) => {
            match subcmd_matches.subcommand() {
                Some(("therapists", _)) => println!("{}", format_therapists()),
                Some(("session-types", _)) => println!("{}", format_session_types()),
                Some(("plans", _)) => println!("{}", format_plans()),
                _ => subcommand_catalog().print_long_help()?,
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some(("plans", subcmd_matches)) => {
            if let Some(("select", select_matches)) = subcmd_matches.subcommand() {
                if let Some(plan_id) = select_matches.get_one::<String>("plan-id") {
                    let notice = select_plan(&PaymentsManager::get(), plan_id).await?;
                    println!("{notice}");
                }
            } else {
                subcommand_plans().print_long_help()?;
            }

            return Ok(false);
        }
        Some(("user", subcmd_matches)) => {
            load_config(&matches, subcmd_matches).await?;
            match subcmd_matches.subcommand() {
                Some(("show", _)) => {
                    print_user().await?;
                }
                Some(("clear", _)) => {
                    UserStore::default().clear().await?;
                    println!("Usuário removido.");
                }
                _ => {
                    subcommand_user().print_long_help()?;
                }
            }

            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
