//! Request and response bodies.

use gamedex_core::{CatalogEntry, EditDraft, ExternalId, Rating, RemoteId};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Image sent when the search provider had no cover image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200";

/// Body of create and update requests.
///
/// Field names follow the remote service (`rawgId`, `image`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePayload {
    /// Search provider ID.
    pub rawg_id: ExternalId,
    /// Game name.
    pub name: String,
    /// Custom description.
    pub description: String,
    /// Doubled rating.
    pub rating: Rating,
    /// Cover image URL.
    pub image: String,
}

impl GamePayload {
    /// Builds a payload from an entry and the edit being saved.
    ///
    /// `placeholder` is used when the entry has no image.
    pub fn from_entry(entry: &CatalogEntry, draft: &EditDraft, placeholder: &str) -> Self {
        Self {
            rawg_id: entry.external_id(),
            name: entry.name().to_string(),
            description: draft.description.clone(),
            rating: draft.rating,
            image: entry
                .image_url()
                .filter(|url| !url.is_empty())
                .unwrap_or(placeholder)
                .to_string(),
        }
    }

    /// Encodes to JSON.
    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decodes from JSON.
    pub fn decode(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

/// Response of a create request.
///
/// Any other fields the service echoes back are ignored. The service assigns
/// numeric IDs; `id` is accepted both as a JSON number and as a string of
/// digits. Anything else fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedGame {
    /// Assigned remote ID.
    #[serde(deserialize_with = "remote_id_from_number_or_string")]
    pub id: RemoteId,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(u64),
    Text(String),
}

fn remote_id_from_number_or_string<'de, D>(deserializer: D) -> Result<RemoteId, D::Error>
where
    D: Deserializer<'de>,
{
    match WireId::deserialize(deserializer)? {
        WireId::Number(id) => Ok(RemoteId::new(id)),
        WireId::Text(text) => text
            .trim()
            .parse()
            .map(RemoteId::new)
            .map_err(|_| de::Error::custom(format!("remote id is not numeric: {text:?}"))),
    }
}

impl CreatedGame {
    /// Creates a new create response.
    pub fn new(id: u64) -> Self {
        Self {
            id: RemoteId::new(id),
        }
    }

    /// Decodes from JSON.
    pub fn decode(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedex_core::GameSummary;
    use serde_json::json;

    #[test]
    fn payload_uses_service_field_names() {
        let entry = CatalogEntry::new(&GameSummary::new(
            42,
            "Example",
            Some("https://img.example/42.jpg".into()),
        ));
        let draft = EditDraft {
            description: "Great game".into(),
            rating: Rating::new(8).unwrap(),
        };

        let payload = GamePayload::from_entry(&entry, &draft, PLACEHOLDER_IMAGE);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "rawgId": 42,
                "name": "Example",
                "description": "Great game",
                "rating": 8,
                "image": "https://img.example/42.jpg",
            })
        );
    }

    #[test]
    fn missing_image_uses_placeholder() {
        let entry = CatalogEntry::new(&GameSummary::new(1, "No Cover", None));
        let payload = GamePayload::from_entry(&entry, &entry.draft(), PLACEHOLDER_IMAGE);
        assert_eq!(payload.image, PLACEHOLDER_IMAGE);

        let entry = CatalogEntry::new(&GameSummary::new(2, "Empty Cover", Some(String::new())));
        let payload = GamePayload::from_entry(&entry, &entry.draft(), "https://other/");
        assert_eq!(payload.image, "https://other/");
    }

    #[test]
    fn created_game_ignores_extra_fields() {
        let body = br#"{"id": 900, "rawgId": 42, "name": "Example", "rating": 8}"#;
        let created = CreatedGame::decode(body).unwrap();
        assert_eq!(created.id, RemoteId::new(900));
    }

    #[test]
    fn created_game_accepts_string_id() {
        let created = CreatedGame::decode(br#"{"id": "900", "name": "Example"}"#).unwrap();
        assert_eq!(created.id, RemoteId::new(900));
        assert!(CreatedGame::decode(br#"{"id": "abc"}"#).is_err());
        assert!(CreatedGame::decode(br#"{"id": -1}"#).is_err());
    }

    #[test]
    fn encoded_payload_is_service_json() {
        let entry = CatalogEntry::new(&GameSummary::new(7, "Seven", None));
        let payload = GamePayload::from_entry(&entry, &entry.draft(), PLACEHOLDER_IMAGE);
        let bytes = payload.encode().unwrap();

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["rawgId"], json!(7));
        assert_eq!(value["rating"], json!(0));
        assert_eq!(GamePayload::decode(&bytes).unwrap(), payload);
    }

    #[test]
    fn created_game_requires_id() {
        assert!(CreatedGame::decode(br#"{"name": "Example"}"#).is_err());
    }

    #[test]
    fn payload_rejects_off_scale_rating() {
        let body = br#"{"rawgId": 1, "name": "x", "description": "", "rating": 5, "image": ""}"#;
        assert!(GamePayload::decode(body).is_err());
    }
}
