//! PokeAPI Client
//!
//! HTTP access to the PokeAPI, with every GET routed through the response
//! cache keyed by its full request URL.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::pokeapi::{LocationArea, LocationAreaList, Pokemon};

// == Client ==
/// Cache-aware PokeAPI client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    cache: Cache,
    base_url: String,
}

impl Client {
    // == Constructor ==
    /// Creates a client that uses `cache` for every lookup.
    pub fn new(config: &Config, cache: Cache) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            http,
            cache,
            base_url: config.base_url.clone(),
        })
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// URL of the first page of location areas.
    pub fn first_location_page(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    // == Fetch Bytes ==
    /// Performs an uncached GET and returns the raw body.
    ///
    /// # Errors
    /// `Error::Http` on transport failure, `Error::Status` on a non-2xx reply.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Bytes> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }

    // == Get JSON ==
    /// Fetches `url` through the cache and decodes the body as `T`.
    ///
    /// Decoding happens after the cache, so the cache only ever sees bytes.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.cache.fetch(url, || self.fetch_bytes(url)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Lists one page of location areas; `None` means the first page.
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaList> {
        match page_url {
            Some(url) => self.get_json(url).await,
            None => self.get_json(&self.first_location_page()).await,
        }
    }

    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.get_json(&url).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config(base_url: &str) -> Config {
        Config {
            base_url: base_url.to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_first_location_page() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let client = Client::new(&test_config("http://localhost:1/api/v2"), cache).unwrap();

        assert_eq!(
            client.first_location_page(),
            "http://localhost:1/api/v2/location-area/"
        );
    }

    #[tokio::test]
    async fn test_cached_body_served_without_network() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        // Nothing listens here; a network call would fail
        let client = Client::new(&test_config("http://127.0.0.1:9"), cache.clone()).unwrap();

        cache
            .add(
                "http://127.0.0.1:9/pokemon/pidgey",
                Bytes::from_static(br#"{"name":"pidgey","base_experience":50,"height":3,"weight":18}"#),
            )
            .await;

        let pokemon = client.pokemon("pidgey").await.unwrap();
        assert_eq!(pokemon.name, "pidgey");
        assert_eq!(pokemon.base_experience, Some(50));
    }

    #[tokio::test]
    async fn test_transport_error_not_cached() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let client = Client::new(&test_config("http://127.0.0.1:9"), cache.clone()).unwrap();

        let result = client.pokemon("pidgey").await;
        assert!(matches!(result, Err(Error::Http(_))));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_undecodable_body_reports_decode_error() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let client = Client::new(&test_config("http://127.0.0.1:9"), cache.clone()).unwrap();

        cache
            .add("http://127.0.0.1:9/pokemon/broken", Bytes::from_static(b"<html>"))
            .await;

        let result = client.pokemon("broken").await;
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
