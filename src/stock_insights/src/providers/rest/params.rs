use reqwest::Url;

use crate::providers::{ProviderError, ProviderInitError};

/// Parses and checks the API base URL.
///
/// Trailing slashes are trimmed; the base must be an `http(s)` URL that can
/// carry path segments.
pub fn parse_base_url(raw: &str) -> Result<Url, ProviderInitError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ProviderInitError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".into()));
    }
    Ok(url)
}

/// Appends `segments` to `base`, percent-encoding each one, and ends the path
/// with `/` as the API's routes expect.
pub fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // parse_base_url rejects cannot-be-a-base URLs, so this always succeeds
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments).push("");
    }
    url
}

/// Rejects symbols that would produce a meaningless detail URL.
pub fn validate_symbol(symbol: &str) -> Result<&str, ProviderError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(ProviderError::Validation("symbol must not be empty".into()));
    }
    Ok(symbol)
}
