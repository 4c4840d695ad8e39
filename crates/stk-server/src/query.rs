//! URL splitting and query-string decoding.

use std::borrow::Cow;

use crate::response::ApiResponse;

/// Decoded `key=value` pairs of a query string.
#[derive(Debug, Default)]
pub(crate) struct Query {
    pairs: Vec<(String, String)>,
}

fn decode(raw: &str) -> Result<String, ApiResponse> {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .map_err(|e| ApiResponse::error(400, "invalid_request", &format!("bad query encoding: {e}")))
}

impl Query {
    /// Split `url` into its path and decoded query.
    pub fn split(url: &str) -> Result<(&str, Self), ApiResponse> {
        let (path, raw) = url.split_once('?').unwrap_or((url, ""));
        let mut pairs = Vec::new();
        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            pairs.push((decode(key)?, decode(value)?));
        }
        Ok((path, Self { pairs }))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// A parameter that must be present and non-empty.
    pub fn require(&self, name: &str) -> Result<&str, ApiResponse> {
        self.get(name)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                ApiResponse::error(
                    400,
                    "invalid_request",
                    &format!("missing query parameter '{name}'"),
                )
            })
    }
}
