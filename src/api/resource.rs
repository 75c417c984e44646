use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Characters returned by the list query. `None` when the API sent no page;
/// entries the API returned as null stay in place as `None`.
///
pub type ListPayload = Option<Vec<Option<CharacterSummary>>>;

/// Character returned by the detail query. `None` when the API found no match.
///
pub type DetailPayload = Option<CharacterDetail>;

/// Defines the short character record shown in lists.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub species: Option<String>,
    pub image: Option<String>,
}

impl CharacterSummary {
    /// Returns a summary with every field set.
    ///
    pub fn new(id: &str, name: &str, species: &str, image: &str) -> Self {
        CharacterSummary {
            id: Some(id.to_owned()),
            name: Some(name.to_owned()),
            species: Some(species.to_owned()),
            image: Some(image.to_owned()),
        }
    }
}

/// Defines a named place (origin or last known location).
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: Option<String>,
}

/// Defines an episode a character appears in.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "episode")]
    pub code: Option<String>,
    pub air_date: Option<String>,
}

/// Defines the full character record shown on the detail screen.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDetail {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub species: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
    pub created: Option<String>,
    pub origin: Option<Place>,
    pub location: Option<Place>,
    #[serde(default)]
    pub episode: Vec<Episode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_accepts_null_fields() {
        let summary: CharacterSummary = serde_json::from_value(json!({
            "id": "2",
            "name": null,
            "species": "alien",
            "image": ""
        }))
        .unwrap();
        assert_eq!(summary.id.as_deref(), Some("2"));
        assert_eq!(summary.name, None);
        assert_eq!(summary.image.as_deref(), Some(""));
    }

    #[test]
    fn detail_renames_type_and_episode_code() {
        let detail: CharacterDetail = serde_json::from_value(json!({
            "id": "1",
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
            "created": "2017-11-04T18:48:46.250Z",
            "origin": { "name": "Earth (C-137)" },
            "location": { "name": "Citadel of Ricks" },
            "episode": [
                { "id": "1", "name": "Pilot", "episode": "S01E01", "air_date": "December 2, 2013" }
            ]
        }))
        .unwrap();
        assert_eq!(detail.kind.as_deref(), Some(""));
        assert_eq!(detail.episode[0].code.as_deref(), Some("S01E01"));
        assert_eq!(
            detail.origin.and_then(|o| o.name).as_deref(),
            Some("Earth (C-137)")
        );
    }

    #[test]
    fn detail_without_episode_defaults_to_empty() {
        let detail: CharacterDetail = serde_json::from_value(json!({ "id": "7" })).unwrap();
        assert!(detail.episode.is_empty());
        assert_eq!(detail.location, None);
    }
}
