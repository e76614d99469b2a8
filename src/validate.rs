use url::Url;

use crate::{Error, Result};

/// Check that user input is a well-formed http(s) URL with a host
pub fn validate_url(input: &str) -> Result<Url> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::InvalidInput("Please provide a URL.".to_string()));
    }

    let invalid = || Error::InvalidInput("Please enter a valid URL.".to_string());

    let url = Url::parse(input).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(invalid()),
    }
}
