//! CB-008: GitHub contents API source.
//!
//! Lists a repository directory through the contents endpoint and fetches
//! each recipe through its `download_url`.

use super::{is_recipe_file, RecipeSource};
use crate::core::types::RecipeEntry;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// One item of a contents listing. Directories have no `download_url`.
#[derive(Debug, Deserialize)]
struct ListingItem {
    name: String,
    #[serde(default)]
    download_url: Option<String>,
}

/// Recipes listed by a repository contents endpoint.
#[derive(Debug, Clone)]
pub struct GithubSource {
    client: reqwest::Client,
    listing_url: String,
}

impl GithubSource {
    pub fn new(listing_url: &str) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cookbook/", env!("CARGO_PKG_VERSION")))
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| format!("cannot build HTTP client: {}", e))?;
        Ok(Self {
            client,
            listing_url: listing_url.to_string(),
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, String> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("GET {} failed: {}", url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("GET {} returned {}", url, status));
        }
        Ok(response)
    }
}

#[async_trait]
impl RecipeSource for GithubSource {
    async fn list(&self) -> Result<Vec<RecipeEntry>, String> {
        let items: Vec<ListingItem> = self
            .get(&self.listing_url)
            .await?
            .json()
            .await
            .map_err(|e| format!("invalid listing from {}: {}", self.listing_url, e))?;
        Ok(recipe_entries(items))
    }

    async fn fetch(&self, entry: &RecipeEntry) -> Result<String, String> {
        self.get(&entry.download_url)
            .await?
            .text()
            .await
            .map_err(|e| format!("cannot read {}: {}", entry.download_url, e))
    }

    fn location(&self) -> &str {
        &self.listing_url
    }
}

/// Parse a contents listing payload into recipe entries.
pub fn parse_listing(json: &str) -> Result<Vec<RecipeEntry>, String> {
    let items: Vec<ListingItem> =
        serde_json::from_str(json).map_err(|e| format!("invalid listing: {}", e))?;
    Ok(recipe_entries(items))
}

fn recipe_entries(items: Vec<ListingItem>) -> Vec<RecipeEntry> {
    items
        .into_iter()
        .filter(|item| is_recipe_file(&item.name))
        .filter_map(|item| {
            item.download_url.map(|download_url| RecipeEntry {
                name: item.name,
                download_url,
            })
        })
        .collect()
}
