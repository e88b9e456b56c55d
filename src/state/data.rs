/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API layer and the UI layer.

use serde::{Deserialize, Deserializer};

/// Unique identifier of a character as assigned by the API
pub type CharacterId = u32;

/// One character as returned by the API. Immutable once fetched.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: CharacterId,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, rename = "alternate_names", deserialize_with = "nullable_list")]
    pub alternate_names: Vec<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub species: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub gender: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub house: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub eye_colour: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub hair_colour: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub patronus: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub actor: String,
    /// Portrait URL, empty when the API has no picture
    #[serde(default, deserialize_with = "nullable_string")]
    pub image: String,
}

/// Body of the collection endpoint
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CharacterCollection {
    pub characters: Vec<CharacterRecord>,
}

impl CharacterRecord {
    /// Only records with a picture get a grid card
    pub fn has_image(&self) -> bool {
        !self.image.trim().is_empty()
    }

    /// The descriptive fields shown on both card and detail panel, in display order
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("Species", self.species.as_str()),
            ("Gender", self.gender.as_str()),
            ("House", self.house.as_str()),
            ("Date of Birth", self.date_of_birth.as_str()),
            ("Eye Colour", self.eye_colour.as_str()),
            ("Hair Colour", self.hair_colour.as_str()),
            ("Patronus", self.patronus.as_str()),
            ("Actor", self.actor.as_str()),
        ]
    }
}

/// `null` and missing both become an empty string
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
