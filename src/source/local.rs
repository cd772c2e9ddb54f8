//! CB-007: Local directory source.

use super::{is_recipe_file, RecipeSource, RECIPE_EXTENSION};
use crate::core::types::RecipeEntry;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Recipes stored as `*.yaml` files in one directory.
#[derive(Debug, Clone)]
pub struct LocalSource {
    dir: PathBuf,
    location: String,
}

impl LocalSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let location = dir.display().to_string();
        Self { dir, location }
    }
}

/// Matching `*.yaml` files in `dir`, sorted by name. Blocking.
fn scan(dir: &Path) -> Result<Vec<RecipeEntry>, String> {
    let pattern = format!(
        "{}/*{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        RECIPE_EXTENSION
    );
    let paths = glob::glob(&pattern).map_err(|e| format!("invalid glob {}: {}", pattern, e))?;

    let mut entries = Vec::new();
    for path in paths {
        let path = path.map_err(|e| format!("cannot read {}: {}", e.path().display(), e))?;
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        if is_recipe_file(&name) {
            entries.push(RecipeEntry {
                name,
                download_url: path.display().to_string(),
            });
        }
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

#[async_trait]
impl RecipeSource for LocalSource {
    async fn list(&self) -> Result<Vec<RecipeEntry>, String> {
        let is_dir = tokio::fs::metadata(&self.dir)
            .await
            .is_ok_and(|meta| meta.is_dir());
        if !is_dir {
            return Err(format!("cannot read recipe directory {}", self.dir.display()));
        }
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || scan(&dir))
            .await
            .map_err(|e| format!("recipe directory scan failed: {}", e))?
    }

    async fn fetch(&self, entry: &RecipeEntry) -> Result<String, String> {
        tokio::fs::read_to_string(&entry.download_url)
            .await
            .map_err(|e| format!("cannot read {}: {}", entry.download_url, e))
    }

    fn location(&self) -> &str {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cb007_list_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("waffles.yaml"), "x").unwrap();
        std::fs::write(dir.path().join("pancakes.yaml"), "x").unwrap();
        std::fs::write(dir.path().join("README.md"), "x").unwrap();
        std::fs::create_dir(dir.path().join("drafts.yaml")).unwrap();

        let source = LocalSource::new(dir.path());
        let entries = source.list().await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["pancakes.yaml", "waffles.yaml"]);
    }

    #[tokio::test]
    async fn test_cb007_fetch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("toast.yaml"), "info: {name: Toast}").unwrap();
        let source = LocalSource::new(dir.path());
        let entries = source.list().await.unwrap();
        let text = source.fetch(&entries[0]).await.unwrap();
        assert_eq!(text, "info: {name: Toast}");
    }

    #[test]
    fn test_cb007_scan_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.yaml"), "x").unwrap();
        std::fs::write(dir.path().join("a.yaml"), "x").unwrap();
        let entries = scan(dir.path()).unwrap();
        assert_eq!(entries[0].name, "a.yaml");
        assert_eq!(entries[1].name, "b.yaml");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_cb007_list_on_current_thread_runtime() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("toast.yaml"), "x").unwrap();
        let source = LocalSource::new(dir.path());
        assert_eq!(source.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cb007_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("toast.yaml");
        std::fs::write(&file, "x").unwrap();
        let err = LocalSource::new(&file).list().await.unwrap_err();
        assert!(err.contains("cannot read recipe directory"));
    }

    #[tokio::test]
    async fn test_cb007_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let source = LocalSource::new(dir.path().join("nope"));
        let err = source.list().await.unwrap_err();
        assert!(err.contains("cannot read recipe directory"));
    }

    #[tokio::test]
    async fn test_cb007_fetch_missing_file() {
        let source = LocalSource::new("/nonexistent");
        let entry = RecipeEntry {
            name: "ghost.yaml".to_string(),
            download_url: "/nonexistent/ghost.yaml".to_string(),
        };
        assert!(source.fetch(&entry).await.unwrap_err().contains("cannot read"));
    }
}
