//! External-service connection parameters.
//!
//! All values come from the process environment at startup. Missing or
//! placeholder values produce a warning but never block execution — the
//! app starts and fails per-request instead.

/// Environment variable names, in the order they are reported.
const REQUIRED_VARS: &[&str] = &[
    "YUNA_API_KEY",
    "YUNA_AUTH_DOMAIN",
    "YUNA_PROJECT_ID",
    "YUNA_STORAGE_BUCKET",
    "YUNA_MESSAGING_SENDER_ID",
    "YUNA_APP_ID",
];

const OPTIONAL_MEASUREMENT_ID: &str = "YUNA_MEASUREMENT_ID";

/// Connection parameters for the backing services.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    pub measurement_id: String,
}

impl ServiceConfig {
    /// Read the configuration from the process environment, warning about
    /// missing or placeholder values.
    pub fn from_env() -> Self {
        let config = Self::from_lookup(|name| std::env::var(name).ok());
        let missing = config.missing_vars();
        if !missing.is_empty() {
            tracing::warn!(
                "Missing or placeholder environment variables: {}",
                missing.join(", ")
            );
            tracing::warn!("Update your environment with actual service configuration values.");
        }
        config
    }

    /// Build from an arbitrary lookup function. Keeps `from_env` testable
    /// without mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).unwrap_or_default();
        Self {
            api_key: get("YUNA_API_KEY"),
            auth_domain: get("YUNA_AUTH_DOMAIN"),
            project_id: get("YUNA_PROJECT_ID"),
            storage_bucket: get("YUNA_STORAGE_BUCKET"),
            messaging_sender_id: get("YUNA_MESSAGING_SENDER_ID"),
            app_id: get("YUNA_APP_ID"),
            measurement_id: get(OPTIONAL_MEASUREMENT_ID),
        }
    }

    /// Names of required variables that are unset or still placeholders.
    pub fn missing_vars(&self) -> Vec<&'static str> {
        REQUIRED_VARS
            .iter()
            .zip([
                &self.api_key,
                &self.auth_domain,
                &self.project_id,
                &self.storage_bucket,
                &self.messaging_sender_id,
                &self.app_id,
            ])
            .filter(|(_, value)| value.is_empty() || value.starts_with("your-"))
            .map(|(name, _)| *name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("YUNA_API_KEY", "AIzaSyTest"),
            ("YUNA_AUTH_DOMAIN", "yuna-test.firebaseapp.com"),
            ("YUNA_PROJECT_ID", "yuna-test"),
            ("YUNA_STORAGE_BUCKET", "yuna-test.appspot.com"),
            ("YUNA_MESSAGING_SENDER_ID", "123456"),
            ("YUNA_APP_ID", "1:123456:web:abc"),
        ])
    }

    #[test]
    fn test_complete_config_has_no_missing_vars() {
        let env = full_env();
        let config = ServiceConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        assert!(config.missing_vars().is_empty());
        assert_eq!(config.project_id, "yuna-test");
        assert_eq!(config.measurement_id, "");
    }

    #[test]
    fn test_missing_and_placeholder_values_are_reported() {
        let mut env = full_env();
        env.remove("YUNA_APP_ID");
        env.insert("YUNA_API_KEY", "your-api-key");

        let config = ServiceConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        let missing = config.missing_vars();
        assert_eq!(missing, vec!["YUNA_API_KEY", "YUNA_APP_ID"]);
    }

    #[test]
    fn test_measurement_id_is_optional() {
        let mut env = full_env();
        env.insert("YUNA_MEASUREMENT_ID", "G-TEST");
        let config = ServiceConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.measurement_id, "G-TEST");
        assert!(config.missing_vars().is_empty());
    }
}
