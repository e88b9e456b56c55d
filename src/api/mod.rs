/// Remote data module
///
/// This module handles:
/// - Fetching the character collection once at startup (characters.rs)
/// - Downloading and decoding card portraits (portrait.rs)

pub mod characters;
pub mod portrait;

use crate::error::FetchError;

/// Issue a plain GET and reject non-success statuses
pub(crate) async fn get(
    client: &reqwest::Client,
    url: &str,
) -> Result<reqwest::Response, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    Ok(response)
}
