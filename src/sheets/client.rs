use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use url::Url;

use super::auth::TokenSource;
use super::locator::DocumentLocator;
use super::records::records_from_values;
use super::SheetLoader;
use crate::data::model::SheetTable;
use crate::error::{LoadError, RemoteAccessError};

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

// ---------------------------------------------------------------------------
// Sheets v4 response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<JsonValue>>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: ApiError,
}

#[derive(Debug, Default, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Blocking Google Sheets reader. Every `load_sheet` call authenticates
/// afresh and reads the whole worksheet.
pub struct SheetsClient<T> {
    http: Client,
    api_base: Url,
    tokens: T,
}

impl<T: TokenSource> SheetsClient<T> {
    pub fn new(tokens: T, api_base: Url) -> Self {
        Self {
            http: Client::new(),
            api_base,
            tokens,
        }
    }

    fn endpoint(&self, document: &DocumentLocator, tail: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v4", "spreadsheets", document.id()])
                .extend(tail);
        }
        url
    }

    fn get_json<R: DeserializeOwned>(
        &self,
        url: Url,
        token: &str,
        document: &DocumentLocator,
    ) -> Result<R, RemoteAccessError> {
        log::debug!("GET {url}");
        let resp = self
            .http
            .get(url.clone())
            .bearer_auth(token)
            .send()
            .map_err(|source| RemoteAccessError::Transport {
                url: url.to_string(),
                source,
            })?;

        let resp = check_status(resp, document)?;
        resp.json().map_err(|source| RemoteAccessError::MalformedResponse {
            url: url.to_string(),
            source,
        })
    }

    fn sheet_titles(
        &self,
        document: &DocumentLocator,
        token: &str,
    ) -> Result<Vec<String>, RemoteAccessError> {
        let mut url = self.endpoint(document, &[]);
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");
        let meta: SpreadsheetMeta = self.get_json(url, token, document)?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    fn sheet_values(
        &self,
        document: &DocumentLocator,
        sheet_name: &str,
        token: &str,
    ) -> Result<Vec<Vec<JsonValue>>, RemoteAccessError> {
        let range = a1_sheet_range(sheet_name);
        let mut url = self.endpoint(document, &["values", &range]);
        url.query_pairs_mut()
            .append_pair("majorDimension", "ROWS")
            .append_pair("valueRenderOption", "UNFORMATTED_VALUE")
            .append_pair("dateTimeRenderOption", "FORMATTED_STRING");
        let range: ValueRange = self.get_json(url, token, document)?;
        Ok(range.values)
    }
}

impl<T: TokenSource> SheetLoader for SheetsClient<T> {
    fn load_sheet(
        &self,
        document: &DocumentLocator,
        sheet_name: &str,
    ) -> Result<SheetTable, LoadError> {
        let token = self.tokens.access_token(&self.http)?;

        let titles = self.sheet_titles(document, &token)?;
        if !titles.iter().any(|t| t == sheet_name) {
            return Err(RemoteAccessError::SheetNotFound {
                document: document.id().to_string(),
                sheet: sheet_name.to_string(),
            }
            .into());
        }

        let values = self.sheet_values(document, sheet_name, &token)?;
        Ok(records_from_values(&values)?)
    }
}

/// Quote a sheet title as an A1 range covering the whole sheet.
fn a1_sheet_range(sheet_name: &str) -> String {
    format!("'{}'", sheet_name.replace('\'', "''"))
}

fn check_status(resp: Response, document: &DocumentLocator) -> Result<Response, RemoteAccessError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp
        .json::<ApiErrorBody>()
        .map(|b| b.error.message)
        .unwrap_or_default();

    Err(match status {
        StatusCode::NOT_FOUND => RemoteAccessError::DocumentNotFound(document.id().to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteAccessError::Unauthorized(message),
        other => RemoteAccessError::Status {
            status: other.as_u16(),
            message,
        },
    })
}
