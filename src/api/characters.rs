/// Character collection loader
///
/// One GET against the configured endpoint, expecting
/// `{ "characters": [ ... ] }`. No retries, no pagination, no cancellation.

use crate::error::FetchError;
use crate::state::data::{CharacterCollection, CharacterRecord};

/// Fetch the whole character collection
pub async fn load_characters(
    client: reqwest::Client,
    endpoint: String,
) -> Result<Vec<CharacterRecord>, FetchError> {
    tracing::info!("Fetching characters from {}", endpoint);

    let response = super::get(&client, &endpoint).await?;
    let collection: CharacterCollection = response.json().await?;

    Ok(collection.characters)
}
