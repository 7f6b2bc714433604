// src/config.rs
use crate::constants::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, CREDENTIALS_FILE_NAME, DEFAULT_TICKETS_DIR,
    TOKEN_ENV,
};
use crate::error::AppError;
use crate::types::{ApiToken, InstanceUrl, TicketKey, ValidationError};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(
    name = "jt",
    author,
    version,
    about = "Fetch Jira tickets as local markdown files",
    long_about = None
)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a ticket and save it as markdown, keeping your "## My Notes"
    Pull {
        /// Ticket key (e.g. PROJ-123), or a bare number with a default project
        key: String,

        /// Only refresh the comments section of the saved file
        #[arg(long, default_value_t = false)]
        comments_only: bool,

        /// Show what would change without saving
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Print a saved ticket to stdout
    View { key: String },

    /// Print the file path of a ticket
    Path { key: String },

    /// Manage authentication
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Inspect or change settings
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Write a new configuration file
    Init {
        /// Jira Cloud URL, e.g. https://myorg.atlassian.net
        #[arg(long)]
        instance: String,

        /// Account email used for basic auth
        #[arg(long)]
        email: String,

        /// Project prefixed to bare ticket numbers
        #[arg(long)]
        default_project: Option<String>,

        /// Where ticket files are saved
        #[arg(long)]
        tickets_dir: Option<String>,

        /// Overwrite an existing configuration
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AuthCommand {
    /// Verify credentials against /rest/api/3/myself
    Test,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the current settings with the token masked
    Show,
    /// Change one setting (instance, email, default_project, tickets_dir)
    Set { key: String, value: String },
}

// --- Persistent settings ---

fn default_tickets_dir() -> String {
    DEFAULT_TICKETS_DIR.to_string()
}

fn default_token_storage() -> String {
    "file".to_string()
}

/// Contents of `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub instance: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,
    #[serde(default = "default_tickets_dir")]
    pub tickets_dir: String,
    /// Where the token was stored when the file was written. Tokens are
    /// read from the environment or the credentials file regardless.
    #[serde(default = "default_token_storage")]
    pub token_storage: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instance: String::new(),
            email: String::new(),
            default_project: None,
            tickets_dir: default_tickets_dir(),
            token_storage: default_token_storage(),
        }
    }
}

impl Settings {
    /// Reads settings, reporting a missing file as missing configuration.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AppError::MissingConfiguration(format!(
                    "config file not found at {}; run 'jt init' to set up",
                    path.display()
                )))
            }
            Err(e) => return Err(e.into()),
        };
        log::debug!("Loaded settings from {}", path.display());
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Writes settings, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        log::info!("Wrote settings to {}", path.display());
        Ok(())
    }

    /// Collects every problem rather than stopping at the first.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        if self.instance.trim().is_empty() {
            problems.push("instance is required".to_string());
        } else if !self.instance.trim().starts_with("https://") {
            problems.push("instance must start with https://".to_string());
        }
        if self.email.trim().is_empty() {
            problems.push("email is required".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidConfiguration { problems })
        }
    }

    /// Updates one setting by its file key.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        let value = value.trim();
        match key {
            "instance" => self.instance = InstanceUrl::parse(value)?.as_str().to_string(),
            "email" => {
                if value.is_empty() {
                    return Err(ValidationError::EmptyField("email"));
                }
                self.email = value.to_string();
            }
            "default_project" => {
                self.default_project = Some(value.to_uppercase()).filter(|p| !p.is_empty());
            }
            "tickets_dir" => {
                if value.is_empty() {
                    return Err(ValidationError::EmptyField("tickets_dir"));
                }
                self.tickets_dir = value.to_string();
            }
            other => return Err(ValidationError::UnknownConfigKey(other.to_string())),
        }
        Ok(())
    }
}

// --- Locations ---

/// Where the configuration and credentials files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    dir: PathBuf,
}

impl ConfigPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$JT_CONFIG_DIR`, else `~/.jt`.
    pub fn from_environment() -> Result<Self, AppError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(Self::new(dir));
        }
        let home = home_dir().ok_or_else(|| {
            AppError::MissingConfiguration("cannot determine home directory".to_string())
        })?;
        Ok(Self::new(home.join(CONFIG_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.dir.join(CREDENTIALS_FILE_NAME)
    }
}

/// The user's home directory from `HOME`, or `USERPROFILE` on Windows.
pub fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .iter()
        .filter_map(std::env::var_os)
        .find(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Expands a leading `~` against `home`.
pub fn expand_home(path: &str, home: Option<&Path>) -> Result<PathBuf, AppError> {
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(PathBuf::from(path));
    };
    let home = home.ok_or_else(|| {
        AppError::MissingConfiguration(format!("cannot expand {}: no home directory", path))
    })?;
    Ok(home.join(rest.trim_start_matches(['/', '\\'])))
}

/// Picks the API token: `env_token` when set, else the credentials file.
pub fn resolve_token(env_token: Option<String>, credentials: &Path) -> Result<ApiToken, AppError> {
    if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
        log::debug!("Using API token from {}", TOKEN_ENV);
        return Ok(ApiToken::new(token)?);
    }

    match fs::read_to_string(credentials) {
        Ok(text) => {
            log::debug!("Using API token from {}", credentials.display());
            Ok(ApiToken::new(text)?)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::MissingConfiguration(format!(
            "no API token: set {} or write it to {}",
            TOKEN_ENV,
            credentials.display()
        ))),
        Err(e) => Err(e.into()),
    }
}

// --- Resolved runtime configuration ---

/// Validated settings ready to drive a command.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub instance: InstanceUrl,
    pub email: String,
    pub default_project: Option<String>,
    pub tickets_dir: PathBuf,
    credentials_file: PathBuf,
}

impl ResolvedConfig {
    /// Validates `settings` and expands the tickets directory.
    pub fn resolve(settings: &Settings, paths: &ConfigPaths) -> Result<Self, AppError> {
        settings.validate()?;
        let instance = InstanceUrl::parse(&settings.instance)?;
        let tickets_dir = expand_home(&settings.tickets_dir, home_dir().as_deref())?;

        Ok(Self {
            instance,
            email: settings.email.trim().to_string(),
            default_project: settings.default_project.clone(),
            tickets_dir,
            credentials_file: paths.credentials_file(),
        })
    }

    /// Loads `config.yaml` from `paths` and resolves it.
    pub fn load(paths: &ConfigPaths) -> Result<Self, AppError> {
        let settings = Settings::load_from(&paths.config_file())?;
        Self::resolve(&settings, paths)
    }

    /// Normalises user input into a ticket key using the default project.
    pub fn ticket_key(&self, input: &str) -> Result<TicketKey, AppError> {
        Ok(TicketKey::resolve(input, self.default_project.as_deref())?)
    }

    /// Reads the API token; only commands that call Jira need it.
    pub fn api_token(&self) -> Result<ApiToken, AppError> {
        resolve_token(std::env::var(TOKEN_ENV).ok(), &self.credentials_file)
    }
}
