//! CB-006: Recipe sources: listing and fetching recipe documents.
//!
//! A source is either the GitHub contents API of a recipe repository or a
//! local directory. Only files ending in `.yaml` are recipes.

pub mod github;
pub mod local;

use crate::core::parser;
use crate::core::types::{Recipe, RecipeEntry};
use async_trait::async_trait;
use tracing::debug;

/// Recipe document file extension.
pub const RECIPE_EXTENSION: &str = ".yaml";

/// Contents endpoint of the public recipe repository.
pub const DEFAULT_LISTING_URL: &str =
    "https://api.github.com/repos/joelverm/recipequest-repo/contents/";

/// Where recipe documents come from.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// List the recipe documents, in listing order.
    async fn list(&self) -> Result<Vec<RecipeEntry>, String>;

    /// Fetch the raw text of one document.
    async fn fetch(&self, entry: &RecipeEntry) -> Result<String, String>;

    /// Human-readable location, for messages.
    fn location(&self) -> &str;
}

/// Open a source: `http(s)://` locations are contents endpoints, anything
/// else is a directory.
pub fn open(location: &str) -> Result<Box<dyn RecipeSource>, String> {
    if is_remote(location) {
        Ok(Box::new(github::GithubSource::new(location)?))
    } else {
        Ok(Box::new(local::LocalSource::new(location)))
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Whether a file name is a recipe document.
pub fn is_recipe_file(name: &str) -> bool {
    name.ends_with(RECIPE_EXTENSION)
}

/// File name without the recipe extension.
pub fn recipe_stem(name: &str) -> &str {
    name.strip_suffix(RECIPE_EXTENSION).unwrap_or(name)
}

/// Fetch and parse one recipe.
pub async fn load_recipe(source: &dyn RecipeSource, entry: &RecipeEntry) -> Result<Recipe, String> {
    debug!(recipe = %entry.name, url = %entry.download_url, "fetching recipe");
    let text = source.fetch(entry).await?;
    parser::parse_recipe(&text).map_err(|e| format!("{}: {}", entry.name, e))
}
