use thiserror::Error;

mod domain_types;
mod ids;

pub use domain_types::*;
pub use ids::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid ticket key: {input} - {reason}")]
    InvalidTicketKey { input: String, reason: String },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Unknown config key {0:?}; valid keys: instance, email, default_project, tickets_dir")]
    UnknownConfigKey(String),
}
