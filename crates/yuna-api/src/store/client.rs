use std::time::Duration;

use futures::Stream;
use reqwest::Client;

use yuna_core::config::ServiceConfig;
use yuna_core::models::{EntryUpdate, ListEntry, ListEntryDraft};
use yuna_core::session::Session;

use super::error::StoreError;
use super::types::{self, Document, QueryRow, WriteBody};

const BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Collection holding every user's list entries, keyed by `userId`.
const COLLECTION: &str = "animeListings";

/// How often the watch stream re-runs its query.
const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Client for the hosted document store backing the personal list.
///
/// Every operation is a direct pass-through; there is no local cache,
/// conflict resolution, or offline queueing.
#[derive(Debug, Clone)]
pub struct ListStoreClient {
    http: Client,
    documents_url: String,
    api_key: String,
}

impl ListStoreClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            http: Client::new(),
            documents_url: format!(
                "{BASE_URL}/projects/{}/databases/(default)/documents",
                config.project_id
            ),
            api_key: config.api_key.clone(),
        }
    }

    fn auth_header(session: &Session) -> String {
        format!("Bearer {}", session.id_token)
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "document store error");
            Err(StoreError::Api {
                status,
                message: body,
            })
        }
    }

    /// Create a list entry from a draft. Returns the store-assigned
    /// document id.
    pub async fn add(
        &self,
        session: &Session,
        draft: &ListEntryDraft,
    ) -> Result<String, StoreError> {
        let resp = self
            .http
            .post(format!("{}/{COLLECTION}", self.documents_url))
            .header("Authorization", Self::auth_header(session))
            .query(&[("key", &self.api_key)])
            .json(&WriteBody {
                fields: types::draft_fields(draft),
            })
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let doc: Document = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(doc.doc_id().to_string())
    }

    /// One-shot fetch of every entry owned by `user_id`.
    pub async fn list(
        &self,
        session: &Session,
        user_id: &str,
    ) -> Result<Vec<ListEntry>, StoreError> {
        let resp = self
            .http
            .post(format!("{}:runQuery", self.documents_url))
            .header("Authorization", Self::auth_header(session))
            .query(&[("key", &self.api_key)])
            .json(&types::list_query(COLLECTION, user_id))
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let rows: Vec<QueryRow> = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        rows.into_iter()
            .filter_map(|row| row.document)
            .map(Document::into_list_entry)
            .collect()
    }

    /// Merge the given fields into one entry; unnamed fields are
    /// untouched.
    pub async fn update(
        &self,
        session: &Session,
        doc_id: &str,
        update: &EntryUpdate,
    ) -> Result<(), StoreError> {
        let (mask, fields) = types::update_fields(update);
        if mask.is_empty() {
            return Ok(());
        }

        let mut params: Vec<(&str, String)> =
            vec![("key", self.api_key.clone())];
        for path in &mask {
            params.push(("updateMask.fieldPaths", path.to_string()));
        }

        let resp = self
            .http
            .patch(format!("{}/{COLLECTION}/{doc_id}", self.documents_url))
            .header("Authorization", Self::auth_header(session))
            .query(&params)
            .json(&WriteBody { fields })
            .send()
            .await?;

        Self::check_response(resp).await?;
        Ok(())
    }

    /// Remove one entry.
    pub async fn delete(&self, session: &Session, doc_id: &str) -> Result<(), StoreError> {
        let resp = self
            .http
            .delete(format!("{}/{COLLECTION}/{doc_id}", self.documents_url))
            .header("Authorization", Self::auth_header(session))
            .query(&[("key", &self.api_key)])
            .send()
            .await?;

        Self::check_response(resp).await?;
        Ok(())
    }

    /// Listen for changes to `user_id`'s list.
    ///
    /// Delivers the full current list immediately, then again on every
    /// observed change, until the stream is dropped or aborted. The
    /// hosted store's streaming channel is not reachable over REST, so
    /// the listener re-runs the query on an interval and emits only when
    /// the result set differs. An error ends the stream after being
    /// delivered.
    pub fn watch(
        &self,
        session: &Session,
        user_id: &str,
    ) -> impl Stream<Item = Result<Vec<ListEntry>, StoreError>> + Send + 'static {
        enum WatchState {
            Initial,
            Delivered(Vec<ListEntry>),
            Ended,
        }

        let client = self.clone();
        let session = session.clone();
        let user_id = user_id.to_string();

        futures::stream::unfold(WatchState::Initial, move |state| {
            let client = client.clone();
            let session = session.clone();
            let user_id = user_id.clone();
            async move {
                let mut last = match state {
                    WatchState::Ended => return None,
                    WatchState::Initial => None,
                    WatchState::Delivered(entries) => Some(entries),
                };

                loop {
                    if last.is_some() {
                        tokio::time::sleep(POLL_INTERVAL).await;
                    }
                    match client.list(&session, &user_id).await {
                        Ok(mut entries) => {
                            entries.sort_by(|a, b| a.doc_id.cmp(&b.doc_id));
                            if last.as_ref() != Some(&entries) {
                                return Some((
                                    Ok(entries.clone()),
                                    WatchState::Delivered(entries),
                                ));
                            }
                            last = Some(entries);
                        }
                        Err(e) => return Some((Err(e), WatchState::Ended)),
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use yuna_core::session::SessionUser;

    /// Points at a closed local port so every request fails fast instead
    /// of hanging.
    fn offline_client() -> ListStoreClient {
        ListStoreClient {
            http: Client::new(),
            documents_url: "http://127.0.0.1:1/v1/projects/test/databases/(default)/documents"
                .into(),
            api_key: String::new(),
        }
    }

    fn test_session() -> Session {
        Session {
            user: SessionUser {
                uid: "user-1".into(),
                email: None,
                is_anonymous: true,
            },
            id_token: "tok".into(),
            expires_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_empty_update_skips_the_store() {
        let client = offline_client();
        let session = test_session();
        // No fields to write: succeeds without reaching the (dead) server.
        client
            .update(&session, "doc-1", &EntryUpdate::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_watch_delivers_error_then_ends() {
        let client = offline_client();
        let session = test_session();
        let mut stream = Box::pin(client.watch(&session, "user-1"));

        let first = stream.next().await.expect("one delivery");
        assert!(first.is_err());
        assert!(stream.next().await.is_none());
    }
}
