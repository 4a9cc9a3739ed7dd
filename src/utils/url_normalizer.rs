//! Normalization of the destination URLs users submit for shortening.

use url::Url;

/// Longest destination URL accepted, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a destination URL is refused.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL is longer than {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Brings a destination URL into canonical form.
///
/// - surrounding whitespace is trimmed
/// - only `http` and `https` are accepted
/// - the host is lowercased by the parser, default ports are dropped
/// - the fragment is removed; path and query are kept as they are
///
/// ```ignore
/// assert_eq!(
///     normalize_url(" HTTPS://Example.COM:443/Path?q=1#top ").unwrap(),
///     "https://example.com/Path?q=1"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }
    if input.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    // `Url` already omits a port equal to the scheme default.
    url.set_fragment(None);

    Ok(url.into())
}
