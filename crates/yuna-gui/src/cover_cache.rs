use std::collections::HashMap;
use std::path::PathBuf;

/// State of a cover image for a given catalog id.
#[derive(Debug, Clone)]
pub enum CoverState {
    Loading,
    Loaded(PathBuf),
    Failed,
}

/// In-memory cache mapping catalog ids to their cover image state.
///
/// Search results and list entries share the same catalog ids, so a cover
/// fetched on one screen is reused on the other.
#[derive(Debug, Default)]
pub struct CoverCache {
    pub states: HashMap<String, CoverState>,
}

impl CoverCache {
    pub fn get(&self, catalog_id: &str) -> Option<&CoverState> {
        self.states.get(catalog_id)
    }
}

/// Directory for cached cover images.
pub fn covers_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "yuna")
        .map(|dirs| dirs.data_dir().join("covers"))
        .unwrap_or_else(|| PathBuf::from("covers"))
}

/// Expected file path for a cover image. Catalog ids are numeric strings,
/// so they are safe as file names.
pub fn cover_path(catalog_id: &str) -> PathBuf {
    covers_dir().join(format!("{catalog_id}.jpg"))
}

/// Download a cover image and save it to disk. Returns the saved path.
pub async fn fetch_cover(catalog_id: String, url: String) -> Result<PathBuf, String> {
    let dir = covers_dir();
    std::fs::create_dir_all(&dir).map_err(|e| e.to_string())?;

    let path = cover_path(&catalog_id);

    let bytes = reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())?;

    std::fs::write(&path, &bytes).map_err(|e| e.to_string())?;
    Ok(path)
}
