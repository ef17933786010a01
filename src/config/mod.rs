use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_range, Validate,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "invitaciones")]
#[command(about = "Event RSVP web service: guest lookup, quota validation and confirmations")]
pub struct AppConfig {
    /// Roster file with the invited groups and their ticket ceilings.
    #[arg(long, default_value = "data/invitados.csv")]
    pub roster_path: String,

    /// Directory for locally stored confirmations.
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    #[arg(long, default_value = "8000")]
    pub port: u16,

    /// Event date shown on the invitation page.
    #[arg(long, default_value = "2025-11-15")]
    pub event_date: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl AppConfig {
    pub fn confirmations_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("confirmaciones.csv")
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("roster_path", &self.roster_path)?;
        validate_file_extension("roster_path", &self.roster_path, &["csv", "tsv"])?;
        validate_path("data_dir", &self.data_dir)?;
        validate_range("port", self.port, 1, u16::MAX)?;
        validate_non_empty_string("event_date", &self.event_date)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            roster_path: "data/invitados.csv".to_string(),
            data_dir: "data".to_string(),
            port: 8000,
            event_date: "2025-11-15".to_string(),
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_unsupported_roster_extension() {
        let mut config = base_config();
        config.roster_path = "data/invitados.xlsx".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_port_zero() {
        let mut config = base_config();
        config.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_confirmations_path_under_data_dir() {
        let config = base_config();
        assert_eq!(
            config.confirmations_path(),
            PathBuf::from("data/confirmaciones.csv")
        );
    }
}
