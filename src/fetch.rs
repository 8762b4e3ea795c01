//! HTTP transport shared by every resource client
//!
//! All requests go through [`FetchBuilder`], which attaches the bearer
//! credential and the client identification header, maps non-2xx responses
//! onto [`Error`], and resolves the backend's two possible list shapes
//! into a plain sequence exactly once, at this boundary.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

use crate::error::{ApiErrorDetails, Error, Result};

pub(crate) const CLIENT_INFO: &str = concat!("movemate-rust/", env!("CARGO_PKG_VERSION"));

/// Either shape the backend uses to answer a list request.
///
/// List endpoints return a paginated envelope or a bare sequence depending
/// on the view; anything else is normalized to an empty sequence.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// Paginated envelope
    Paginated {
        results: Vec<T>,
        count: Option<u64>,
        next: Option<String>,
        previous: Option<String>,
    },
    /// Bare sequence
    Plain(Vec<T>),
    /// Unrecognized shape
    Other(serde_json::Value),
}

impl<T> ListResponse<T> {
    /// Resolve the union into a plain ordered sequence.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated { results, .. } => results,
            ListResponse::Plain(items) => items,
            ListResponse::Other(_) => Vec::new(),
        }
    }
}

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Option<HashMap<String, String>>,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("X-Client-Info", HeaderValue::from_static(CLIENT_INFO));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: None,
            body: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add bearer token authentication to the request
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }

    /// Attach the bearer credential when one is present
    pub fn maybe_bearer(self, token: Option<String>) -> Self {
        match token {
            Some(token) => self.bearer_auth(&token),
            None => self,
        }
    }

    /// Add query parameters to the request
    pub fn query(mut self, params: HashMap<String, String>) -> Self {
        self.query_params = Some(params);
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder> {
        let mut url = Url::parse(&self.url)?;

        if let Some(params) = &self.query_params {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in params {
                query_pairs.append_pair(key, value);
            }
        }

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.build()?.send().await?;
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Execute a list request, normalizing envelope and bare-array shapes
    /// into a plain sequence
    pub async fn execute_list<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let response: ListResponse<T> = self.execute().await?;
        Ok(response.into_items())
    }

    /// Execute a mutation whose success response carries no payload
    pub async fn execute_empty(&self) -> Result<()> {
        let response = self.build()?.send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Execute a request returning a raw binary payload
    pub async fn execute_bytes(&self) -> Result<Bytes> {
        let response = self.build()?.send().await?;
        let response = Self::check(response).await?;
        Ok(response.bytes().await?)
    }

    // Map non-2xx responses onto Error::Api / Error::UnparsedApi.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorDetails>(&text) {
            Ok(details) => Err(Error::Api { status, details }),
            Err(_) => Err(Error::UnparsedApi {
                status,
                message: text,
            }),
        }
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }

    /// Create a PATCH request
    pub fn patch<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PATCH)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        id: i64,
    }

    fn parse(value: serde_json::Value) -> Vec<Item> {
        serde_json::from_value::<ListResponse<Item>>(value)
            .unwrap()
            .into_items()
    }

    #[test]
    fn bare_array_passes_through_unchanged() {
        let items = parse(json!([{ "id": 1 }, { "id": 2 }]));
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);
    }

    #[test]
    fn envelope_unwraps_to_results() {
        let items = parse(json!({
            "results": [{ "id": 3 }],
            "count": 41,
            "next": "http://api.example.com/notifications/?page=2",
            "previous": null
        }));
        assert_eq!(items, vec![Item { id: 3 }]);
    }

    #[test]
    fn envelope_without_pagination_fields_still_unwraps() {
        let items = parse(json!({ "results": [{ "id": 4 }] }));
        assert_eq!(items, vec![Item { id: 4 }]);
    }

    #[test]
    fn null_normalizes_to_empty() {
        assert!(parse(json!(null)).is_empty());
    }

    #[test]
    fn object_without_results_normalizes_to_empty() {
        assert!(parse(json!({ "count": 0 })).is_empty());
    }

    #[test]
    fn empty_envelope_and_empty_array_are_empty() {
        assert!(parse(json!({ "results": [] })).is_empty());
        assert!(parse(json!([])).is_empty());
    }
}
