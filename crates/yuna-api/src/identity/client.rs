use std::sync::Arc;

use futures::{Stream, StreamExt};
use reqwest::Client;
use tokio::sync::watch;

use yuna_core::config::ServiceConfig;
use yuna_core::session::{AuthState, SessionUser};

use super::error::AuthError;
use super::types::{self, SignInResponse};

const BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Client for the hosted identity provider.
///
/// Holds the current session and broadcasts every transition on a watch
/// channel; consumers observe it through [`IdentityClient::watch`]. No
/// credentials are stored and no token refresh is performed.
#[derive(Clone)]
pub struct IdentityClient {
    http: Client,
    api_key: String,
    state: Arc<watch::Sender<AuthState>>,
}

impl IdentityClient {
    pub fn new(config: &ServiceConfig) -> Self {
        let (state, _) = watch::channel(AuthState::SignedOut);
        Self {
            http: Client::new(),
            api_key: config.api_key.clone(),
            state: Arc::new(state),
        }
    }

    /// Snapshot of the current session state.
    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Session-change notifications.
    ///
    /// Emits the current state immediately, then every transition. The
    /// stream ends only when the client is dropped.
    pub fn watch(&self) -> impl Stream<Item = AuthState> + Send + 'static {
        let rx = self.state.subscribe();
        let initial = rx.borrow().clone();

        futures::stream::once(std::future::ready(initial)).chain(futures::stream::unfold(
            rx,
            |mut rx| async move {
                match rx.changed().await {
                    Ok(()) => {
                        let state = rx.borrow_and_update().clone();
                        Some((state, rx))
                    }
                    Err(_) => None,
                }
            },
        ))
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        self.credential_request(
            "accounts:signInWithPassword",
            serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true
            }),
            false,
        )
        .await
    }

    /// Create a new account with email and password.
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, AuthError> {
        self.credential_request(
            "accounts:signUp",
            serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true
            }),
            false,
        )
        .await
    }

    /// Sign in without credentials.
    pub async fn sign_in_anonymously(&self) -> Result<SessionUser, AuthError> {
        self.credential_request(
            "accounts:signUp",
            serde_json::json!({ "returnSecureToken": true }),
            true,
        )
        .await
    }

    /// Clear the current session and notify watchers.
    ///
    /// The service keeps no server-side session for this flow, so there
    /// is nothing to revoke remotely.
    pub fn sign_out(&self) {
        self.state.send_replace(AuthState::SignedOut);
        tracing::info!("user signed out");
    }

    async fn credential_request(
        &self,
        endpoint: &str,
        body: serde_json::Value,
        is_anonymous: bool,
    ) -> Result<SessionUser, AuthError> {
        let resp = self
            .http
            .post(format!("{BASE_URL}/{endpoint}"))
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            let failure = types::failure_from_body(status, &body);
            tracing::warn!(code = %failure.code, "sign-in rejected");
            return Err(AuthError::Service(failure));
        }

        let parsed: SignInResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;

        let session = parsed.into_session(is_anonymous);
        let user = session.user.clone();
        tracing::info!(uid = %user.uid, anonymous = is_anonymous, "user signed in");
        self.state.send_replace(AuthState::SignedIn(session));
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use yuna_core::session::Session;

    fn test_client() -> IdentityClient {
        IdentityClient::new(&ServiceConfig::default())
    }

    fn signed_in_state() -> AuthState {
        AuthState::SignedIn(Session {
            user: SessionUser {
                uid: "u1".into(),
                email: None,
                is_anonymous: true,
            },
            id_token: "tok".into(),
            expires_at: chrono::Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_watch_emits_current_state_first() {
        let client = test_client();
        let mut stream = Box::pin(client.watch());
        assert_eq!(stream.next().await, Some(AuthState::SignedOut));
    }

    #[tokio::test]
    async fn test_sign_out_notifies_watchers() {
        let client = test_client();
        client.state.send_replace(signed_in_state());

        let mut stream = Box::pin(client.watch());
        assert!(stream.next().await.unwrap().is_signed_in());

        client.sign_out();
        assert_eq!(stream.next().await, Some(AuthState::SignedOut));
        assert_eq!(client.current(), AuthState::SignedOut);
    }
}
