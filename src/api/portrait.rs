/// Card portrait download and thumbnailing
///
/// The original bytes back the large detail image; a cover-cropped
/// thumbnail sized to the card backs the grid. Portraits stay in memory.

use iced::widget::image::Handle;
use image::imageops::FilterType;

use crate::error::PortraitError;

/// Decoded images for one character
#[derive(Debug, Clone)]
pub struct Portrait {
    /// Thumbnail cropped to the card's picture area
    pub card: Handle,
    /// Undecoded original for the detail panel
    pub full: Handle,
}

/// Download an image URL and turn it into a portrait
pub async fn fetch_portrait(
    client: reqwest::Client,
    url: String,
    card_size: (u32, u32),
) -> Result<Portrait, PortraitError> {
    let response = super::get(&client, &url).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(crate::error::FetchError::from)?
        .to_vec();

    // Spawn blocking because decoding and resizing are CPU-intensive
    tokio::task::spawn_blocking(move || decode_portrait(bytes, card_size))
        .await
        .map_err(|e| PortraitError::Task(e.to_string()))?
}

/// Decode image bytes and build the card thumbnail
pub fn decode_portrait(bytes: Vec<u8>, card_size: (u32, u32)) -> Result<Portrait, PortraitError> {
    let (width, height) = card_size;

    let img = image::load_from_memory(&bytes)?;
    let thumbnail = img
        .resize_to_fill(width.max(1), height.max(1), FilterType::Lanczos3)
        .to_rgba8();

    let (thumb_width, thumb_height) = thumbnail.dimensions();
    let card = Handle::from_rgba(thumb_width, thumb_height, thumbnail.into_raw());

    Ok(Portrait {
        card,
        full: Handle::from_bytes(bytes),
    })
}
