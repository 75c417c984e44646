mod client;
mod error;
mod query;
mod resource;

pub use error::ApiError;
pub use resource::*;

use async_trait::async_trait;
use client::Client;
use log::*;
use query::{CharacterData, CharactersListData, CHARACTER, CHARACTERS_LIST};
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://rickandmortyapi.com/graphql";

/// Read-only access to character data, as consumed by the fetch controllers.
///
#[async_trait]
pub trait CharacterDataSource: Send + Sync {
    /// Fetch the character list.
    async fn fetch_list(&self) -> Result<ListPayload, ApiError>;

    /// Fetch one character by identifier.
    async fn fetch_detail(&self, id: &str) -> Result<DetailPayload, ApiError>;
}

/// Responsible for asynchronous interaction with the character API including
/// transformation of response data into explicitly-defined types.
///
pub struct CharacterApi {
    client: Client,
}

impl CharacterApi {
    /// Returns a new instance for the given GraphQL endpoint.
    ///
    pub fn new(endpoint: &str, timeout: Duration) -> Result<CharacterApi, ApiError> {
        let client = Client::new(endpoint, timeout)?;
        debug!("Initialized GraphQL client for {}", client.endpoint);
        Ok(CharacterApi { client })
    }

    /// Returns the first page of characters, keeping null entries in place.
    ///
    pub async fn characters(&self) -> Result<ListPayload, ApiError> {
        debug!("Requesting characters list...");
        let data: Option<CharactersListData> = self.client.query(CHARACTERS_LIST, json!({})).await?;
        let results = data.and_then(|d| d.characters).and_then(|c| c.results);

        if let Some(results) = &results {
            let missing = results.iter().filter(|c| c.is_none()).count();
            if missing > 0 {
                warn!("Characters list holds {} null entries", missing);
            }
            debug!("Retrieved {} characters", results.len());
        }
        Ok(results)
    }

    /// Returns the character with the given ID, if the API knows it.
    ///
    pub async fn character(&self, id: &str) -> Result<DetailPayload, ApiError> {
        debug!("Requesting details for character ID {}...", id);
        let data: Option<CharacterData> = self.client.query(CHARACTER, json!({ "id": id })).await?;
        Ok(data.and_then(|d| d.character))
    }
}

#[async_trait]
impl CharacterDataSource for CharacterApi {
    async fn fetch_list(&self) -> Result<ListPayload, ApiError> {
        self.characters().await
    }

    async fn fetch_detail(&self, id: &str) -> Result<DetailPayload, ApiError> {
        self.character(id).await
    }
}
