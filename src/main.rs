// src/main.rs
use chrono::Utc;
use clap::Parser;
use jt::constants::{LOG_FILE_NAME, TOKEN_ENV};
use jt::{
    pull_ticket, resolve_token, AppError, AuthCommand, Command, CommandLineInput, ConfigCommand,
    ConfigPaths, IssueRepository, JiraHttpClient, PullRequest, ResolvedConfig, Settings,
    TicketStore,
};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;

/// Sets up logging: warnings (or everything with `--verbose`) to stderr,
/// and debug records to a file in the temp directory.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join(LOG_FILE_NAME);
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Stdout carries ticket content for piping, so logs go to stderr.
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(console_level)))
                .build("console", Box::new(console_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    if let Err(err) = run(cli.command) {
        log::debug!("Command failed: {:?}", err);
        eprintln!("Error: {}", err);
        if let AppError::JiraService { code, .. } = &err {
            if code.is_retryable() {
                eprintln!("Jira may be busy or degraded; try again shortly.");
            }
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: Command) -> Result<(), AppError> {
    let paths = ConfigPaths::from_environment()?;

    match command {
        Command::Pull {
            key,
            comments_only,
            dry_run,
        } => {
            let config = ResolvedConfig::load(&paths)?;
            let request = PullRequest {
                key: config.ticket_key(&key)?,
                comments_only,
                dry_run,
            };
            let client = connect(&config)?;
            let store = TicketStore::new(&config.tickets_dir);

            let outcome = pull_ticket(&client, &store, &request, Utc::now())?;
            print!("{}", outcome.summary());
        }
        Command::View { key } => {
            let config = ResolvedConfig::load(&paths)?;
            let key = config.ticket_key(&key)?;
            let store = TicketStore::new(&config.tickets_dir);

            let content = store
                .load_if_exists(&key)?
                .ok_or_else(|| AppError::NoLocalTicket(key.to_string()))?;
            print!("{}", content);
        }
        Command::Path { key } => {
            let config = ResolvedConfig::load(&paths)?;
            let key = config.ticket_key(&key)?;
            println!("{}", TicketStore::new(&config.tickets_dir).path(&key).display());
        }
        Command::Auth(AuthCommand::Test) => {
            let config = ResolvedConfig::load(&paths)?;
            let user = connect(&config)?.current_user()?;

            println!("Authenticated as {} ({})", user.display_name, user.email);
            println!("Account ID: {}", user.account_id);
            println!("Time zone:  {}", user.time_zone);
            println!("Active:     {}", user.active);
        }
        Command::Config(ConfigCommand::Show) => show_config(&paths)?,
        Command::Config(ConfigCommand::Set { key, value }) => {
            let path = paths.config_file();
            let mut settings = Settings::load_from(&path)?;
            settings.set_value(&key, &value)?;
            settings.save_to(&path)?;
            println!("{} set to {:?}", key, value.trim());
        }
        Command::Init {
            instance,
            email,
            default_project,
            tickets_dir,
            force,
        } => {
            let path = paths.config_file();
            if path.exists() && !force {
                return Err(AppError::InvalidConfiguration {
                    problems: vec![format!(
                        "configuration already exists at {}; pass --force to overwrite",
                        path.display()
                    )],
                });
            }

            let mut settings = Settings::default();
            settings.set_value("instance", &instance)?;
            settings.set_value("email", &email)?;
            if let Some(project) = default_project {
                settings.set_value("default_project", &project)?;
            }
            if let Some(dir) = tickets_dir {
                settings.set_value("tickets_dir", &dir)?;
            }
            settings.validate()?;
            settings.save_to(&path)?;
            println!("Configuration saved to {}", path.display());

            if resolve_token(std::env::var(TOKEN_ENV).ok(), &paths.credentials_file()).is_err() {
                println!(
                    "No API token found: set {} or write it to {}",
                    TOKEN_ENV,
                    paths.credentials_file().display()
                );
            }
        }
    }

    Ok(())
}

fn connect(config: &ResolvedConfig) -> Result<JiraHttpClient, AppError> {
    JiraHttpClient::new(config.instance.clone(), &config.email, config.api_token()?)
}

fn show_config(paths: &ConfigPaths) -> Result<(), AppError> {
    let settings = Settings::load_from(&paths.config_file())?;
    let token = resolve_token(std::env::var(TOKEN_ENV).ok(), &paths.credentials_file())
        .map(|t| t.masked())
        .unwrap_or_else(|_| "(not set)".to_string());

    println!("instance:        {}", settings.instance);
    println!("email:           {}", settings.email);
    println!(
        "default_project: {}",
        settings.default_project.as_deref().unwrap_or("")
    );
    println!("tickets_dir:     {}", settings.tickets_dir);
    println!("token_storage:   {}", settings.token_storage);
    println!("token:           {}", token);
    Ok(())
}
