use serde::{Deserialize, Serialize};

/// A normalized search result from the external anime catalog.
///
/// Ephemeral: produced per query, never persisted, discarded when a new
/// query supersedes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Source-assigned identifier, stringified.
    pub id: String,
    pub title: String,
    pub image_url: Option<String>,
}

/// User's watch status for a list entry.
///
/// Serializes to the exact strings stored in the `animeListings`
/// collection, spaces included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatchStatus {
    #[serde(rename = "Not Watched")]
    NotWatched,
    Watching,
    Completed,
    Dropped,
}

impl WatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotWatched => "Not Watched",
            Self::Watching => "Watching",
            Self::Completed => "Completed",
            Self::Dropped => "Dropped",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Not Watched" => Some(Self::NotWatched),
            "Watching" => Some(Self::Watching),
            "Completed" => Some(Self::Completed),
            "Dropped" => Some(Self::Dropped),
            _ => None,
        }
    }

    pub const ALL: &[WatchStatus] = &[
        Self::NotWatched,
        Self::Watching,
        Self::Completed,
        Self::Dropped,
    ];
}

impl std::fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-owned persisted record tracking one anime's watch status.
///
/// `doc_id` is assigned by the document store; the remaining fields mirror
/// the stored document one-to-one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub doc_id: String,
    pub user_id: String,
    /// Identifier of the source catalog entry (wire field `id`).
    pub catalog_id: String,
    pub title: String,
    pub image_url: String,
    pub status: WatchStatus,
    pub episodes_watched: u32,
    pub notes: String,
}

/// Field set for a new list entry, before the store assigns a document id.
///
/// The defaults for a fresh entry live here and nowhere else: status
/// Not Watched, zero episodes, empty notes.
#[derive(Debug, Clone)]
pub struct ListEntryDraft {
    pub user_id: String,
    pub catalog_id: String,
    pub title: String,
    pub image_url: String,
    pub status: WatchStatus,
    pub episodes_watched: u32,
    pub notes: String,
}

impl ListEntryDraft {
    /// Build a draft from a catalog search result.
    pub fn from_catalog(user_id: &str, entry: &CatalogEntry) -> Self {
        Self {
            user_id: user_id.to_string(),
            catalog_id: entry.id.clone(),
            title: entry.title.clone(),
            image_url: entry.image_url.clone().unwrap_or_default(),
            status: WatchStatus::NotWatched,
            episodes_watched: 0,
            notes: String::new(),
        }
    }
}

/// A partial update to one list entry.
///
/// Only `Some` fields are written; everything else is preserved by the
/// store.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub status: Option<WatchStatus>,
    pub episodes_watched: Option<u32>,
    pub notes: Option<String>,
}

impl EntryUpdate {
    pub fn status(status: WatchStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn episodes(episodes: u32) -> Self {
        Self {
            episodes_watched: Some(episodes),
            ..Self::default()
        }
    }

    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.episodes_watched.is_none() && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for &status in WatchStatus::ALL {
            assert_eq!(WatchStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(WatchStatus::from_str("Plan to Watch"), None);
    }

    #[test]
    fn test_draft_defaults() {
        let catalog = CatalogEntry {
            id: "20".into(),
            title: "Naruto".into(),
            image_url: Some("https://cdn.myanimelist.net/images/anime/13/17405.jpg".into()),
        };
        let draft = ListEntryDraft::from_catalog("user-1", &catalog);

        assert_eq!(draft.user_id, "user-1");
        assert_eq!(draft.catalog_id, "20");
        assert_eq!(draft.status, WatchStatus::NotWatched);
        assert_eq!(draft.episodes_watched, 0);
        assert_eq!(draft.notes, "");
    }

    #[test]
    fn test_draft_without_image() {
        let catalog = CatalogEntry {
            id: "1".into(),
            title: "Cowboy Bebop".into(),
            image_url: None,
        };
        let draft = ListEntryDraft::from_catalog("user-1", &catalog);
        assert_eq!(draft.image_url, "");
    }

    #[test]
    fn test_update_is_empty() {
        assert!(EntryUpdate::default().is_empty());
        assert!(!EntryUpdate::status(WatchStatus::Completed).is_empty());
        assert!(!EntryUpdate::episodes(220).is_empty());
        assert!(!EntryUpdate::notes("rewatch someday").is_empty());
    }
}
