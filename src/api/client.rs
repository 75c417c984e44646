//! HTTP client for GraphQL requests.
//!
//! This module wraps `reqwest` to post GraphQL operations to a single
//! endpoint and unwrap the `data`/`errors` envelope of the response.

use super::error::ApiError;
use super::query::Operation;
use log::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body of a GraphQL request.
///
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Request<'a, V: Serialize> {
    operation_name: &'a str,
    query: &'a str,
    variables: V,
}

/// Envelope of a GraphQL response.
///
#[derive(Deserialize)]
struct Envelope<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    message: String,
}

/// Posts operations to a GraphQL endpoint and conforms the `data` field to
/// the given model.
///
pub struct Client {
    pub(crate) endpoint: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given endpoint and request timeout.
    ///
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ApiError> {
        reqwest::Url::parse(endpoint).map_err(|e| ApiError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            message: e.to_string(),
        })?;
        Ok(Client {
            endpoint: endpoint.to_owned(),
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    /// Execute the operation and return its `data`, which the server may
    /// leave null.
    ///
    /// Errors alongside data are logged and the partial data is returned.
    /// Errors without data fail the call.
    ///
    pub async fn query<V, D>(&self, operation: Operation, variables: V) -> Result<Option<D>, ApiError>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        debug!("Posting GraphQL operation '{}'...", operation.name);
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&Request {
                operation_name: operation.name,
                query: operation.document,
                variables,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            error!(
                "GraphQL operation '{}' failed with status {}: {}",
                operation.name, status, body
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: Envelope<D> = serde_json::from_slice(&bytes).map_err(|e| {
            error!(
                "Failed to deserialize response to '{}': {}. Response body: {}",
                operation.name,
                e,
                String::from_utf8_lossy(&bytes)
            );
            e
        })?;

        let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        match envelope.data {
            None if !messages.is_empty() => Err(ApiError::GraphQl(messages)),
            data => {
                if !messages.is_empty() {
                    warn!(
                        "GraphQL operation '{}' returned partial data with errors: {:?}",
                        operation.name, messages
                    );
                }
                Ok(data)
            }
        }
    }
}
