use std::fmt;

use url::Url;

use crate::error::RemoteAccessError;

/// A spreadsheet ID extracted from a URL or given directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocator {
    id: String,
}

impl DocumentLocator {
    /// Accepts `https://docs.google.com/spreadsheets/d/<ID>/...`, legacy
    /// `...?key=<ID>` URLs, or a bare ID.
    pub fn parse(input: &str) -> Result<Self, RemoteAccessError> {
        let input = input.trim();
        let invalid = || RemoteAccessError::InvalidLocator(input.to_string());

        let id = match Url::parse(input) {
            Ok(url) => id_from_url(&url).ok_or_else(invalid)?,
            Err(_) if is_valid_id(input) => input.to_string(),
            Err(_) => return Err(invalid()),
        };
        Ok(Self { id })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DocumentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

fn id_from_url(url: &Url) -> Option<String> {
    if let Some(segments) = url.path_segments() {
        let segments: Vec<&str> = segments.collect();
        let found = segments
            .windows(3)
            .find(|w| w[0] == "spreadsheets" && w[1] == "d")
            .map(|w| w[2]);
        if let Some(id) = found.filter(|id| is_valid_id(id)) {
            return Some(id.to_string());
        }
    }
    url.query_pairs()
        .find(|(k, _)| k == "key")
        .map(|(_, v)| v.into_owned())
        .filter(|id| is_valid_id(id))
}

fn is_valid_id(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "1hIToCx1ICTuIv9qA8PNx_y9R3xI-7cjWarr-5XOfGxg";

    #[test]
    fn test_parse_edit_url() {
        let url = format!("https://docs.google.com/spreadsheets/d/{ID}/edit#gid=0");
        assert_eq!(DocumentLocator::parse(&url).unwrap().id(), ID);
    }

    #[test]
    fn test_parse_bare_url_and_id() {
        let url = format!("https://docs.google.com/spreadsheets/d/{ID}");
        assert_eq!(DocumentLocator::parse(&url).unwrap().id(), ID);
        assert_eq!(DocumentLocator::parse(ID).unwrap().id(), ID);
        assert_eq!(DocumentLocator::parse(&format!("  {ID}\n")).unwrap().id(), ID);
    }

    #[test]
    fn test_parse_legacy_key_url() {
        let url = format!("https://docs.google.com/spreadsheet/ccc?key={ID}&output=csv");
        assert_eq!(DocumentLocator::parse(&url).unwrap().id(), ID);
    }

    #[test]
    fn test_reject_urls_without_id() {
        for bad in [
            "https://docs.google.com/spreadsheets/",
            "https://example.com/some/page",
            "",
            "not a sheet id!",
        ] {
            let err = DocumentLocator::parse(bad).unwrap_err();
            assert!(matches!(err, RemoteAccessError::InvalidLocator(_)), "{bad}");
        }
    }
}
