//! Account models: credentials, register and login bodies, professions.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Credentials obtained from a successful login or registration.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    /// Bearer token sent with authenticated requests.
    pub access_token: String,
    /// Server-side identifier of the user.
    pub user_id: String,
    /// Email address the user signed in with.
    pub user_email: String,
}

impl Credential {
    /// Bundle a token with the user it was issued to.
    pub fn new(
        access_token: impl Into<String>,
        user_id: impl Into<String>,
        user_email: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            user_id: user_id.into(),
            user_email: user_email.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("user_email", &self.user_email)
            .finish()
    }
}

/// Request body for `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Email address used to sign in.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Full name shown on the account.
    pub full_name: String,
    /// Always sent, as `null` when unset.
    pub username: Option<String>,
}

/// Request body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Email address of the account.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Response body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// Bearer token for authenticated requests.
    pub access_token: String,
    /// Token scheme, normally `bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Identifier of the signed-in user.
    pub user_id: String,
}

/// Nested payload of a register acknowledgement.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RegisteredUser {
    /// Identifier of the new user.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response body for `POST /register`.
///
/// Servers either answer with a token directly or with a plain
/// acknowledgement carrying the new user id.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    /// Bearer token, when the server signs the user in directly.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Identifier of the new user, at the top level.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Acknowledgement text.
    #[serde(default)]
    pub message: Option<String>,
    /// Acknowledgement payload.
    #[serde(default)]
    pub data: Option<RegisteredUser>,
}

impl RegisterResponse {
    /// Token and user id when the server signed the user in directly.
    #[must_use]
    pub fn token(&self) -> Option<(&str, &str)> {
        let token = self.access_token.as_deref().filter(|t| !t.is_empty())?;
        let user_id = self
            .user_id
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|d| d.user_id.as_deref()))?;
        Some((token, user_id))
    }
}

/// Professions offered during registration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Profession {
    /// Photographer
    Photographer,
    /// Designer
    Designer,
    /// Developer
    Developer,
    /// Writer
    Writer,
    /// Consultant
    Consultant,
    /// Coach
    Coach,
    /// Artist
    Artist,
    /// Therapist
    Therapist,
    /// Chef
    Chef,
    /// Fitness trainer
    Trainer,
}

impl Profession {
    /// Identifier used on the command line.
    #[must_use]
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Label shown to users.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Photographer => "Photographer",
            Self::Designer => "Designer",
            Self::Developer => "Developer",
            Self::Writer => "Writer",
            Self::Consultant => "Consultant",
            Self::Coach => "Coach",
            Self::Artist => "Artist",
            Self::Therapist => "Therapist",
            Self::Chef => "Chef",
            Self::Trainer => "Fitness Trainer",
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn credential_debug_hides_token() {
        let credential = Credential::new("secret-token", "user-1", "jane@x.com");
        let debug = format!("{credential:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("user-1"));
        assert!(debug.contains("jane@x.com"));
    }

    #[test]
    fn register_request_sends_null_username() {
        let request = RegisterRequest {
            email: "jane@x.com".to_string(),
            password: "Abcdefg1".to_string(),
            full_name: "Jane Doe".to_string(),
            username: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "email": "jane@x.com",
                "password": "Abcdefg1",
                "full_name": "Jane Doe",
                "username": null
            })
        );
    }

    #[test]
    fn token_response_requires_token_and_user() {
        let parsed: TokenResponse = serde_json::from_value(json!({
            "access_token": "abc",
            "token_type": "bearer",
            "user_id": "42"
        }))
        .unwrap();
        assert_eq!(parsed.access_token, "abc");
        assert_eq!(parsed.user_id, "42");

        assert!(serde_json::from_value::<TokenResponse>(json!({"user_id": "42"})).is_err());
    }

    #[test]
    fn register_response_token_variants() {
        let direct: RegisterResponse =
            serde_json::from_value(json!({"access_token": "abc", "user_id": "7"})).unwrap();
        assert_eq!(direct.token(), Some(("abc", "7")));

        let nested: RegisterResponse = serde_json::from_value(json!({
            "access_token": "abc",
            "data": {"user_id": "8"}
        }))
        .unwrap();
        assert_eq!(nested.token(), Some(("abc", "8")));

        let acknowledgement: RegisterResponse = serde_json::from_value(json!({
            "success": true,
            "message": "User registered successfully",
            "data": {"user_id": "9"}
        }))
        .unwrap();
        assert_eq!(acknowledgement.token(), None);
    }

    #[test]
    fn profession_parses_ids() {
        for profession in Profession::iter() {
            assert_eq!(Profession::from_str(profession.id()).unwrap(), profession);
        }
        assert_eq!(Profession::from_str("Chef").unwrap(), Profession::Chef);
        assert_eq!(Profession::Trainer.to_string(), "Fitness Trainer");
        assert!(Profession::from_str("astronaut").is_err());
    }
}
