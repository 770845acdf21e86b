use std::path::PathBuf;

use clap::Parser;
use url::Url;

use crate::error::CredentialError;
use crate::sheets::auth::ServiceAccount;
use crate::sheets::client::DEFAULT_API_BASE;

pub const DEFAULT_LIST_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1hIToCx1ICTuIv9qA8PNx_y9R3xI-7cjWarr-5XOfGxg";

/// Startup configuration. Every option can also come from the environment
/// (or a `.env` file in the working directory).
#[derive(Debug, Clone, Parser)]
#[command(name = "rentdesk", version, about = "Rental property dashboard with a Google Sheets lookup list")]
pub struct Config {
    /// URL or ID of the spreadsheet holding the lookup list
    #[arg(long, env = "RENTDESK_SHEET_URL", default_value = DEFAULT_LIST_SHEET_URL)]
    pub sheet_url: String,

    /// Worksheet name inside that spreadsheet
    #[arg(long, env = "RENTDESK_SHEET_NAME", default_value = "list")]
    pub sheet_name: String,

    /// Path to the service account JSON key
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Base URL of the Sheets REST API
    #[arg(long, env = "RENTDESK_SHEETS_API", default_value = DEFAULT_API_BASE)]
    pub sheets_api: Url,
}

impl Config {
    /// Load and validate the configured service account key.
    pub fn service_account(&self) -> Result<ServiceAccount, CredentialError> {
        let path = self.credentials.as_ref().ok_or(CredentialError::Missing)?;
        ServiceAccount::from_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["rentdesk"]).unwrap();
        assert_eq!(config.sheet_name, "list");
        assert_eq!(config.sheets_api.as_str(), "https://sheets.googleapis.com/");
        // The default locator must parse.
        assert!(crate::sheets::DocumentLocator::parse(&config.sheet_url).is_ok());
    }

    #[test]
    fn test_flags_override() {
        let config = Config::try_parse_from([
            "rentdesk",
            "--sheet-name",
            "masters",
            "--credentials",
            "/tmp/key.json",
            "--sheets-api",
            "http://localhost:9000",
        ])
        .unwrap();
        assert_eq!(config.sheet_name, "masters");
        assert_eq!(config.credentials, Some(PathBuf::from("/tmp/key.json")));
        assert_eq!(config.sheets_api.host_str(), Some("localhost"));
    }

    #[test]
    fn test_missing_credentials() {
        let config = Config {
            sheet_url: DEFAULT_LIST_SHEET_URL.to_string(),
            sheet_name: "list".to_string(),
            credentials: None,
            sheets_api: Url::parse(DEFAULT_API_BASE).unwrap(),
        };
        assert!(matches!(
            config.service_account(),
            Err(CredentialError::Missing)
        ));
    }

    #[test]
    fn test_bad_api_url_rejected() {
        assert!(Config::try_parse_from(["rentdesk", "--sheets-api", "not a url"]).is_err());
    }
}
