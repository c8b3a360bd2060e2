use chrono::Utc;
use serde::Deserialize;

use yuna_core::session::{Session, SessionUser};

use super::error::AuthFailure;

/// Fallback token lifetime when the service omits `expiresIn`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

// ── Sign-in / sign-up responses ─────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub local_id: String,
    pub email: Option<String>,
    pub id_token: String,
    #[allow(dead_code)]
    pub refresh_token: Option<String>,
    /// Seconds, carried as a JSON string by the service.
    pub expires_in: Option<String>,
}

impl SignInResponse {
    pub fn into_session(self, is_anonymous: bool) -> Session {
        let lifetime = self
            .expires_in
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);

        Session {
            user: SessionUser {
                uid: self.local_id,
                // Anonymous accounts come back without an email; some
                // responses carry an empty string instead.
                email: self.email.filter(|e| !e.is_empty()),
                is_anonymous,
            },
            id_token: self.id_token,
            expires_at: Utc::now() + chrono::Duration::seconds(lifetime),
        }
    }
}

// ── Error responses ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Parse a failed response body into a code/message pair.
///
/// The service packs the machine code into the first token of the
/// message, optionally followed by ` : human text`.
pub fn failure_from_body(status: u16, body: &str) -> AuthFailure {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => {
            let message = parsed.error.message;
            let code = message
                .split(&[' ', ':'][..])
                .next()
                .filter(|c| !c.is_empty())
                .unwrap_or("UNKNOWN")
                .to_string();
            AuthFailure { code, message }
        }
        Err(_) => AuthFailure {
            code: format!("HTTP_{status}"),
            message: body.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_sign_in_response() {
        let json = r#"{
            "kind": "identitytoolkit#VerifyPasswordResponse",
            "localId": "qmjvRi4EQ6SbNB",
            "email": "rin@example.com",
            "displayName": "",
            "idToken": "eyJhbGciOi...",
            "registered": true,
            "refreshToken": "AMf-vBw...",
            "expiresIn": "3600"
        }"#;

        let resp: SignInResponse = serde_json::from_str(json).unwrap();
        let session = resp.into_session(false);
        assert_eq!(session.user.uid, "qmjvRi4EQ6SbNB");
        assert_eq!(session.user.email.as_deref(), Some("rin@example.com"));
        assert!(!session.user.is_anonymous);
        assert_eq!(session.user.display_name(), "rin@example.com");
        assert!(session.expires_at > Utc::now());
    }

    #[test]
    fn test_anonymous_sign_up_response() {
        let json = r#"{
            "kind": "identitytoolkit#SignupNewUserResponse",
            "localId": "anon-uid",
            "idToken": "eyJhbGciOi...",
            "refreshToken": "AMf-vBw...",
            "expiresIn": "3600"
        }"#;

        let resp: SignInResponse = serde_json::from_str(json).unwrap();
        let session = resp.into_session(true);
        assert!(session.user.is_anonymous);
        assert!(session.user.email.is_none());
        assert_eq!(session.user.display_name(), "Anonymous User");
    }

    #[test]
    fn test_failure_with_plain_code() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND","errors":[]}}"#;
        let failure = failure_from_body(400, body);
        assert_eq!(failure.code, "EMAIL_NOT_FOUND");
        assert_eq!(failure.message, "EMAIL_NOT_FOUND");
    }

    #[test]
    fn test_failure_with_detail_text() {
        let body = r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}"#;
        let failure = failure_from_body(400, body);
        assert_eq!(failure.code, "WEAK_PASSWORD");
        assert!(failure.message.contains("at least 6 characters"));
    }

    #[test]
    fn test_failure_with_unparseable_body() {
        let failure = failure_from_body(503, "upstream unavailable");
        assert_eq!(failure.code, "HTTP_503");
        assert_eq!(failure.message, "upstream unavailable");
    }
}
