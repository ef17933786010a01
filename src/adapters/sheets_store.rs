use crate::adapters::local_store::CONFIRMATION_HEADERS;
use crate::domain::model::Confirmation;
use crate::domain::ports::ConfirmationStore;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use async_trait::async_trait;
use serde::Deserialize;

/// Connection settings for the remote spreadsheet service.
///
/// All four values come from the environment; the store is only wired into
/// the chain when the whole set is present.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub api_base: String,
    pub spreadsheet_id: String,
    pub range: String,
    pub token: String,
}

impl SheetsConfig {
    pub const API_BASE_VAR: &'static str = "SHEETS_API_BASE";
    pub const SPREADSHEET_ID_VAR: &'static str = "SHEETS_SPREADSHEET_ID";
    pub const RANGE_VAR: &'static str = "SHEETS_RANGE";
    pub const TOKEN_VAR: &'static str = "SHEETS_TOKEN";

    /// Reads the configuration from the environment, `None` when any
    /// variable is missing (the service then runs on local storage only).
    pub fn from_env() -> Option<Self> {
        let config = Self {
            api_base: std::env::var(Self::API_BASE_VAR).ok()?,
            spreadsheet_id: std::env::var(Self::SPREADSHEET_ID_VAR).ok()?,
            range: std::env::var(Self::RANGE_VAR).ok()?,
            token: std::env::var(Self::TOKEN_VAR).ok()?,
        };
        Some(config)
    }
}

impl Validate for SheetsConfig {
    fn validate(&self) -> Result<()> {
        validate_url("sheets_api_base", &self.api_base)?;
        validate_non_empty_string("sheets_spreadsheet_id", &self.spreadsheet_id)?;
        validate_non_empty_string("sheets_range", &self.range)?;
        validate_non_empty_string("sheets_token", &self.token)?;
        Ok(())
    }
}

/// Confirmation store backed by a remote spreadsheet service over HTTP.
///
/// Speaks the values-append / values-get shape of the Google Sheets v4 API
/// with bearer credentials.
#[derive(Debug, Clone)]
pub struct SheetsStore {
    config: SheetsConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsStore {
    pub fn new(config: SheetsConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.spreadsheet_id,
            self.config.range
        )
    }
}

#[async_trait]
impl ConfirmationStore for SheetsStore {
    async fn append(&self, confirmation: &Confirmation) -> Result<()> {
        let url = format!("{}:append?valueInputOption=RAW", self.values_url());
        let body = serde_json::json!({
            "values": [[
                confirmation.name,
                confirmation.attendee_count.to_string(),
                confirmation.confirmed_at,
            ]]
        });

        tracing::debug!("Appending confirmation row via {}", url);
        self.client
            .post(&url)
            .bearer_auth(&self.config.token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Confirmation>> {
        let url = self.values_url();
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.token)
            .send()
            .await?
            .error_for_status()?;

        let value_range: ValueRange = response.json().await?;

        let mut confirmations = Vec::new();
        for row in value_range.values {
            // The sheet may carry the header row; only a full match is a
            // header, a group that happens to be named "Nombre" is data.
            if row.len() == CONFIRMATION_HEADERS.len()
                && row
                    .iter()
                    .zip(CONFIRMATION_HEADERS)
                    .all(|(cell, header)| cell.as_str() == header)
            {
                continue;
            }
            if row.len() < 3 {
                tracing::warn!("Skipping malformed sheet row: {:?}", row);
                continue;
            }
            confirmations.push(Confirmation {
                name: row[0].clone(),
                attendee_count: row[1].trim().parse().unwrap_or(0),
                confirmed_at: row[2].clone(),
            });
        }
        Ok(confirmations)
    }

    fn backend_name(&self) -> &'static str {
        "remote-sheets"
    }
}
