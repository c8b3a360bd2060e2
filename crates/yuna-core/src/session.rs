use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display label for anonymous users.
pub const ANONYMOUS_LABEL: &str = "Anonymous User";

/// The current authenticated (or anonymous) identity, as reported by the
/// identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub uid: String,
    pub email: Option<String>,
    pub is_anonymous: bool,
}

impl SessionUser {
    /// Email for password users, a fixed label for anonymous ones.
    pub fn display_name(&self) -> &str {
        if self.is_anonymous {
            ANONYMOUS_LABEL
        } else {
            self.email.as_deref().unwrap_or(ANONYMOUS_LABEL)
        }
    }
}

/// A live session: the user plus the bearer token that authorizes store
/// calls on their behalf.
///
/// Passed explicitly to every adapter call; nothing reads a process-wide
/// current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: SessionUser,
    pub id_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Session state carried on the change-notification channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn(Session),
}

impl AuthState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(session) => Some(session),
            Self::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_email() {
        let user = SessionUser {
            uid: "u1".into(),
            email: Some("rin@example.com".into()),
            is_anonymous: false,
        };
        assert_eq!(user.display_name(), "rin@example.com");
    }

    #[test]
    fn test_display_name_anonymous() {
        let user = SessionUser {
            uid: "u2".into(),
            email: None,
            is_anonymous: true,
        };
        assert_eq!(user.display_name(), ANONYMOUS_LABEL);
    }

    #[test]
    fn test_auth_state_session_access() {
        assert!(AuthState::SignedOut.session().is_none());
        let state = AuthState::SignedIn(Session {
            user: SessionUser {
                uid: "u3".into(),
                email: None,
                is_anonymous: true,
            },
            id_token: "tok".into(),
            expires_at: Utc::now(),
        });
        assert_eq!(state.session().map(|s| s.user.uid.as_str()), Some("u3"));
        assert!(state.is_signed_in());
    }
}
