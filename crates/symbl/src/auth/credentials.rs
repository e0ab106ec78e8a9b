//! Application credentials type.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, InvalidInputError};

/// Authentication type sent when none is given explicitly.
pub const DEFAULT_AUTH_TYPE: &str = "application";

/// Environment variable holding the application id.
pub const APP_ID_ENV: &str = "APP_ID";

/// Environment variable holding the application secret.
pub const APP_SECRET_ENV: &str = "APP_SECRET";

/// Application credentials for Symbl authentication.
///
/// Credentials are immutable once built and are kept by the session for its
/// whole lifetime so that an expired token can be replaced without asking the
/// caller again.
///
/// # Security
///
/// The secret is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use symbl::Credentials;
///
/// let creds = Credentials::new("my-app-id", "my-app-secret");
/// assert_eq!(creds.app_id(), "my-app-id");
/// assert_eq!(creds.auth_type(), "application");
/// ```
#[derive(Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "type")]
    auth_type: String,
    #[serde(rename = "appId")]
    app_id: String,
    #[serde(rename = "appSecret")]
    app_secret: String,
}

impl Credentials {
    /// Create new credentials with the default `application` auth type.
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            auth_type: DEFAULT_AUTH_TYPE.to_string(),
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Override the auth type. An empty value falls back to the default.
    pub fn with_auth_type(mut self, auth_type: impl Into<String>) -> Self {
        let auth_type = auth_type.into();
        self.auth_type = if auth_type.is_empty() {
            DEFAULT_AUTH_TYPE.to_string()
        } else {
            auth_type
        };
        self
    }

    /// Read credentials from `APP_ID` and `APP_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::MissingEnv`] if either variable is absent
    /// or empty.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build credentials from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.is_empty())
                .ok_or(InvalidInputError::MissingEnv { var })
        };

        let app_id = read(APP_ID_ENV)?;
        let app_secret = read(APP_SECRET_ENV)?;
        Ok(Self::new(app_id, app_secret))
    }

    /// Check that the id and secret are present.
    pub fn validate(&self) -> Result<(), Error> {
        if self.app_id.is_empty() {
            return Err(InvalidInputError::MissingCredential { field: "appId" }.into());
        }
        if self.app_secret.is_empty() {
            return Err(InvalidInputError::MissingCredential { field: "appSecret" }.into());
        }
        Ok(())
    }

    /// Returns the application id.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Returns the auth type sent to the token endpoint.
    pub fn auth_type(&self) -> &str {
        &self.auth_type
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_type", &self.auth_type)
            .field("app_id", &self.app_id)
            .field("app_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn credentials_hides_secret_in_debug() {
        let creds = Credentials::new("app-1", "secret123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("app-1"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn serializes_wire_format_with_default_type() {
        let creds = Credentials::new("id", "secret");
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "application", "appId": "id", "appSecret": "secret"})
        );
    }

    #[test]
    fn empty_auth_type_falls_back_to_default() {
        let creds = Credentials::new("id", "secret").with_auth_type("");
        assert_eq!(creds.auth_type(), DEFAULT_AUTH_TYPE);

        let creds = Credentials::new("id", "secret").with_auth_type("user");
        assert_eq!(creds.auth_type(), "user");
    }

    #[test]
    fn validate_rejects_missing_fields() {
        let err = Credentials::new("", "secret").validate().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::MissingCredential { field: "appId" })
        ));

        let err = Credentials::new("id", "").validate().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::MissingCredential { field: "appSecret" })
        ));

        assert!(Credentials::new("id", "secret").validate().is_ok());
    }

    #[test]
    fn from_lookup_requires_both_variables() {
        let vars: HashMap<&str, &str> = [(APP_ID_ENV, "id")].into_iter().collect();
        let err = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::MissingEnv { var: APP_SECRET_ENV })
        ));

        let vars: HashMap<&str, &str> = [(APP_ID_ENV, ""), (APP_SECRET_ENV, "s")]
            .into_iter()
            .collect();
        let err = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::MissingEnv { var: APP_ID_ENV })
        ));

        let vars: HashMap<&str, &str> = [(APP_ID_ENV, "id"), (APP_SECRET_ENV, "s")]
            .into_iter()
            .collect();
        let creds = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(creds.app_id(), "id");
    }
}
