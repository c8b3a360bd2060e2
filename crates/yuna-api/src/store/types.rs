use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use yuna_core::models::{EntryUpdate, ListEntry, ListEntryDraft, WatchStatus};

use super::error::StoreError;

// ── Firestore wire types ────────────────────────────────────────

/// A typed Firestore value. Exactly one variant per value object; the
/// external serde tagging matches the REST encoding
/// (`{"stringValue": "..."}`). Integers travel as JSON strings per the
/// API's int64 encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    #[serde(rename = "stringValue")]
    String(String),
    #[serde(rename = "integerValue")]
    Integer(String),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn integer(n: u32) -> Self {
        Self::Integer(n.to_string())
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Integer(_) => None,
        }
    }

    fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Integer(s) => s.parse().ok(),
            Self::String(_) => None,
        }
    }
}

/// A stored document: full resource name plus typed fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Document {
    /// Last path segment of the resource name.
    pub fn doc_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// One row of a `runQuery` response. Rows that carry only a `readTime`
/// have no document.
#[derive(Debug, Deserialize)]
pub struct QueryRow {
    pub document: Option<Document>,
}

/// Body for a document write (create or patch).
#[derive(Debug, Serialize)]
pub struct WriteBody {
    pub fields: BTreeMap<String, Value>,
}

// ── Query building ──────────────────────────────────────────────

/// Structured query selecting every list entry owned by `user_id`.
pub fn list_query(collection: &str, user_id: &str) -> serde_json::Value {
    serde_json::json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": "userId" },
                    "op": "EQUAL",
                    "value": { "stringValue": user_id }
                }
            }
        }
    })
}

// ── Conversions ─────────────────────────────────────────────────

/// Encode a draft into the stored field map.
pub fn draft_fields(draft: &ListEntryDraft) -> BTreeMap<String, Value> {
    BTreeMap::from([
        ("userId".into(), Value::string(&draft.user_id)),
        ("id".into(), Value::string(&draft.catalog_id)),
        ("title".into(), Value::string(&draft.title)),
        ("imageUrl".into(), Value::string(&draft.image_url)),
        ("status".into(), Value::string(draft.status.as_str())),
        (
            "episodesWatched".into(),
            Value::integer(draft.episodes_watched),
        ),
        ("notes".into(), Value::string(&draft.notes)),
    ])
}

/// Encode a partial update as (field mask, fields). Only `Some` fields
/// appear in either, so everything else is preserved server-side.
pub fn update_fields(update: &EntryUpdate) -> (Vec<&'static str>, BTreeMap<String, Value>) {
    let mut mask = Vec::new();
    let mut fields = BTreeMap::new();

    if let Some(status) = update.status {
        mask.push("status");
        fields.insert("status".into(), Value::string(status.as_str()));
    }
    if let Some(episodes) = update.episodes_watched {
        mask.push("episodesWatched");
        fields.insert("episodesWatched".into(), Value::integer(episodes));
    }
    if let Some(ref notes) = update.notes {
        mask.push("notes");
        fields.insert("notes".into(), Value::string(notes));
    }

    (mask, fields)
}

impl Document {
    /// Decode a stored document into a list entry.
    pub fn into_list_entry(self) -> Result<ListEntry, StoreError> {
        let doc_id = self.doc_id().to_string();
        let get_str = |name: &str| -> Result<String, StoreError> {
            self.fields
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| StoreError::Parse(format!("missing field `{name}` in {doc_id}")))
        };

        let status_str = get_str("status")?;
        let status = WatchStatus::from_str(&status_str)
            .ok_or_else(|| StoreError::Parse(format!("unknown status `{status_str}`")))?;

        Ok(ListEntry {
            user_id: get_str("userId")?,
            catalog_id: get_str("id")?,
            title: get_str("title")?,
            image_url: get_str("imageUrl").unwrap_or_default(),
            status,
            episodes_watched: self
                .fields
                .get("episodesWatched")
                .and_then(Value::as_u32)
                .unwrap_or(0),
            notes: get_str("notes").unwrap_or_default(),
            doc_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yuna_core::models::CatalogEntry;

    fn sample_document() -> Document {
        let json = r#"{
            "name": "projects/yuna-test/databases/(default)/documents/animeListings/abc123",
            "fields": {
                "userId": { "stringValue": "user-1" },
                "id": { "stringValue": "20" },
                "title": { "stringValue": "Naruto" },
                "imageUrl": { "stringValue": "https://cdn.myanimelist.net/images/anime/13/17405.jpg" },
                "status": { "stringValue": "Not Watched" },
                "episodesWatched": { "integerValue": "0" },
                "notes": { "stringValue": "" }
            },
            "createTime": "2024-05-01T12:00:00.000000Z",
            "updateTime": "2024-05-01T12:00:00.000000Z"
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_document_decodes_to_entry() {
        let entry = sample_document().into_list_entry().unwrap();
        assert_eq!(entry.doc_id, "abc123");
        assert_eq!(entry.user_id, "user-1");
        assert_eq!(entry.catalog_id, "20");
        assert_eq!(entry.status, WatchStatus::NotWatched);
        assert_eq!(entry.episodes_watched, 0);
        assert_eq!(entry.notes, "");
    }

    #[test]
    fn test_unknown_status_is_a_parse_error() {
        let mut doc = sample_document();
        doc.fields
            .insert("status".into(), Value::string("Binging"));
        assert!(matches!(
            doc.into_list_entry(),
            Err(StoreError::Parse(_))
        ));
    }

    #[test]
    fn test_draft_encodes_default_fields() {
        let catalog = CatalogEntry {
            id: "20".into(),
            title: "Naruto".into(),
            image_url: None,
        };
        let draft = ListEntryDraft::from_catalog("user-1", &catalog);
        let fields = draft_fields(&draft);

        assert_eq!(fields["userId"], Value::string("user-1"));
        assert_eq!(fields["status"], Value::string("Not Watched"));
        assert_eq!(fields["episodesWatched"], Value::Integer("0".into()));
        assert_eq!(fields["notes"], Value::string(""));

        // Wire encoding: integers are JSON strings, strings are tagged.
        let json = serde_json::to_value(&WriteBody { fields }).unwrap();
        assert_eq!(
            json["fields"]["episodesWatched"]["integerValue"],
            serde_json::json!("0")
        );
        assert_eq!(
            json["fields"]["status"]["stringValue"],
            serde_json::json!("Not Watched")
        );
    }

    #[test]
    fn test_update_mask_names_only_given_fields() {
        let update = EntryUpdate {
            status: Some(WatchStatus::Completed),
            episodes_watched: Some(220),
            notes: None,
        };
        let (mask, fields) = update_fields(&update);
        assert_eq!(mask, vec!["status", "episodesWatched"]);
        assert_eq!(fields.len(), 2);
        assert!(!fields.contains_key("notes"));

        let (mask, fields) = update_fields(&EntryUpdate::default());
        assert!(mask.is_empty());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_list_query_filters_on_owner() {
        let query = list_query("animeListings", "user-1");
        let filter = &query["structuredQuery"]["where"]["fieldFilter"];
        assert_eq!(filter["field"]["fieldPath"], "userId");
        assert_eq!(filter["op"], "EQUAL");
        assert_eq!(filter["value"]["stringValue"], "user-1");
        assert_eq!(
            query["structuredQuery"]["from"][0]["collectionId"],
            "animeListings"
        );
    }

    #[test]
    fn test_query_rows_without_documents_are_skippable() {
        let json = r#"[
            { "readTime": "2024-05-01T12:00:00.000000Z" },
            { "document": { "name": "projects/p/databases/(default)/documents/animeListings/x", "fields": {} } }
        ]"#;
        let rows: Vec<QueryRow> = serde_json::from_str(json).unwrap();
        assert_eq!(rows.iter().filter(|r| r.document.is_some()).count(), 1);
    }
}
