//! HTTP client for the LocalPro Canvas API.
//!
//! Every operation is a single request/response round trip, except
//! registration against servers that only acknowledge the new account, where
//! a login follows immediately. Failures are normalized into
//! [`SubmissionError`]; portfolio lookups never fail and instead resolve to
//! [`PortfolioLookup::NotFound`] once every lookup tier has missed.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use shared::{
    config::Config,
    models::{
        CreatePortfolioRequest, CreatePortfolioResponse, Credential, Envelope, EnvelopeShape,
        ErrorResponse, LoginRequest, ProfileDraft, RegisterRequest, RegisterResponse, TemplateId,
        TokenResponse,
    },
};
use thiserror::Error;
use url::Url;

use crate::session::Session;

/// Shown when a registration fails without a server reason.
pub const REGISTRATION_FAILED: &str = "Registration failed";
/// Shown when a login fails without a server reason.
pub const LOGIN_FAILED: &str = "Login failed";
/// Shown when portfolio creation fails without a server reason.
pub const CREATE_FAILED: &str = "Failed to create portfolio";
/// Shown when the server accepts a portfolio but returns no identifier.
pub const MISSING_IDENTIFIER: &str = "Portfolio created but identifier is missing";

const USER_AGENT: &str = concat!("localpro-canvas-cli/", env!("CARGO_PKG_VERSION"));

/// A failed submission, ready to show to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct SubmissionError {
    /// Server reason, or the per-operation fallback.
    pub message: String,
    /// HTTP status when the server answered at all.
    pub status: Option<StatusCode>,
}

impl SubmissionError {
    /// Error with `message` and the status the server answered with, if any.
    pub fn new(message: impl Into<String>, status: Option<StatusCode>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

/// Which endpoint served a portfolio lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTier {
    /// `GET /portfolios/{id}` as the owner.
    Owner,
    /// `GET /p/{id}`.
    Public,
}

impl fmt::Display for LookupTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Owner => "owner",
            Self::Public => "public",
        })
    }
}

/// One way of resolving a portfolio identifier.
#[derive(Clone, PartialEq, Eq)]
pub enum LookupStrategy {
    /// `GET /portfolios/{id}` with the owner's bearer token.
    Owner {
        /// Bearer token of the signed-in user.
        token: String,
    },
    /// `GET /p/{id}`, published portfolios only.
    Public,
}

impl fmt::Debug for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner { .. } => f
                .debug_struct("Owner")
                .field("token", &"<redacted>")
                .finish(),
            Self::Public => f.write_str("Public"),
        }
    }
}

impl LookupStrategy {
    /// Tier this strategy represents.
    #[must_use]
    pub fn tier(&self) -> LookupTier {
        match self {
            Self::Owner { .. } => LookupTier::Owner,
            Self::Public => LookupTier::Public,
        }
    }

    /// API path of `identifier` under this tier.
    #[must_use]
    pub fn path(&self, identifier: &str) -> String {
        match self {
            Self::Owner { .. } => format!("portfolios/{identifier}"),
            Self::Public => format!("p/{identifier}"),
        }
    }
}

/// Lookup tiers to try, in order.
#[must_use]
pub fn lookup_plan(credential: Option<&Credential>) -> Vec<LookupStrategy> {
    let mut plan = Vec::with_capacity(2);
    if let Some(credential) = credential {
        plan.push(LookupStrategy::Owner {
            token: credential.access_token.clone(),
        });
    }
    plan.push(LookupStrategy::Public);
    plan
}

/// A portfolio resolved by one of the lookup tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPortfolio {
    /// Identifier that was looked up.
    pub identifier: String,
    /// Template stored alongside wrapped responses, when recognised.
    pub template: Option<TemplateId>,
    /// Profile data of the portfolio.
    pub profile: ProfileDraft,
    /// Tier that answered.
    pub tier: LookupTier,
    /// Shape the body arrived in.
    pub shape: EnvelopeShape,
}

/// Outcome of [`CanvasClient::fetch_portfolio`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioLookup {
    /// A tier resolved the identifier.
    Found(FetchedPortfolio),
    /// Every tier missed.
    NotFound,
}

/// Account and portfolio-creation operations of the API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioApi: Send + Sync {
    /// Create an account and return a credential for it.
    async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Credential, SubmissionError>;

    /// Sign in and return the issued credential.
    async fn login(&self, email: &str, password: &str) -> Result<Credential, SubmissionError>;

    /// Create a portfolio and return its unique identifier.
    async fn create_portfolio(
        &self,
        template: TemplateId,
        draft: &ProfileDraft,
        credential: &Credential,
    ) -> Result<String, SubmissionError>;
}

/// Client bound to one API base URL and one [`Session`].
#[derive(Clone, Debug)]
pub struct CanvasClient {
    base_url: String,
    client: Client,
    session: Session,
}

impl CanvasClient {
    /// Create a client for `base_url`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        base_url: &Url,
        timeout: Option<Duration>,
        session: Session,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            client: builder.build()?,
            session,
        })
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &Config, session: Session) -> Result<Self, reqwest::Error> {
        Self::new(&config.api_base_url, config.request_timeout(), session)
    }

    /// Session the client signs requests for.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.api_url(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn submit<B, T>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
        fallback: &'static str,
    ) -> Result<T, SubmissionError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        tracing::debug!(method = "POST", path, "sending request");
        let response = self
            .request(Method::POST, path, token)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(path, error = %err, "{fallback}");
                SubmissionError::new(fallback, err.status())
            })?;
        decode(response, fallback).await.inspect_err(|err| {
            tracing::warn!(path, status = ?err.status, "{}", err.message);
        })
    }

    fn remember(&self, credential: &Credential) {
        if let Err(err) = self.session.store_credential(credential.clone()) {
            tracing::warn!(error = %err, "signed in but the session could not be saved");
        }
    }

    /// Resolve a portfolio through the owner tier (with a credential) and then
    /// the public tier.
    ///
    /// Any failure of a tier counts as a miss, so this never errors.
    pub async fn fetch_portfolio(
        &self,
        identifier: &str,
        credential: Option<&Credential>,
    ) -> PortfolioLookup {
        for strategy in lookup_plan(credential) {
            if let Some(found) = self.try_lookup(&strategy, identifier).await {
                return PortfolioLookup::Found(found);
            }
        }
        tracing::debug!(identifier, "portfolio not found in any lookup tier");
        PortfolioLookup::NotFound
    }

    async fn try_lookup(
        &self,
        strategy: &LookupStrategy,
        identifier: &str,
    ) -> Option<FetchedPortfolio> {
        let path = strategy.path(identifier);
        let tier = strategy.tier();
        let token = match strategy {
            LookupStrategy::Owner { token } => Some(token.as_str()),
            LookupStrategy::Public => None,
        };
        tracing::debug!(method = "GET", path = %path, %tier, "sending request");

        let response = match self.request(Method::GET, &path, token).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(%tier, error = %err, "lookup miss");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::debug!(%tier, status = %response.status(), "lookup miss");
            return None;
        }
        let envelope: Envelope<ProfileDraft> = match response.json().await {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::debug!(%tier, error = %err, "lookup miss: unexpected body");
                return None;
            }
        };

        Some(FetchedPortfolio {
            identifier: identifier.to_string(),
            template: envelope.template().and_then(|t| t.parse().ok()),
            shape: envelope.shape(),
            profile: envelope.into_data(),
            tier,
        })
    }
}

#[async_trait]
impl PortfolioApi for CanvasClient {
    async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Credential, SubmissionError> {
        let payload = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
            username: None,
        };
        let body: RegisterResponse = self
            .submit("register", &payload, None, REGISTRATION_FAILED)
            .await?;

        let Some((token, user_id)) = body.token() else {
            tracing::debug!("registration acknowledged without a token; signing in");
            return self.login(email, password).await;
        };
        let credential = Credential::new(token, user_id, email);
        self.remember(&credential);
        tracing::info!(user_id = %credential.user_id, "registered");
        Ok(credential)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Credential, SubmissionError> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let body: TokenResponse = self.submit("login", &payload, None, LOGIN_FAILED).await?;
        if body.access_token.is_empty() {
            return Err(SubmissionError::new(LOGIN_FAILED, Some(StatusCode::OK)));
        }

        let credential = Credential::new(body.access_token, body.user_id, email);
        self.remember(&credential);
        tracing::info!(user_id = %credential.user_id, "logged in");
        Ok(credential)
    }

    async fn create_portfolio(
        &self,
        template: TemplateId,
        draft: &ProfileDraft,
        credential: &Credential,
    ) -> Result<String, SubmissionError> {
        let payload = CreatePortfolioRequest::new(template, draft.clone());
        let body: CreatePortfolioResponse = self
            .submit(
                "portfolios",
                &payload,
                Some(&credential.access_token),
                CREATE_FAILED,
            )
            .await?;

        let identifier = body.unique_identifier().ok_or_else(|| {
            tracing::warn!("create response carried no unique identifier");
            SubmissionError::new(MISSING_IDENTIFIER, Some(StatusCode::OK))
        })?;
        tracing::info!(%template, identifier, "portfolio created");
        Ok(identifier.to_string())
    }
}

/// Turn a response into `T`, or into a [`SubmissionError`] carrying the
/// server's reason when it gave one.
async fn decode<T: DeserializeOwned + Send>(
    response: Response,
    fallback: &'static str,
) -> Result<T, SubmissionError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|_| SubmissionError::new(fallback, Some(status)))?;

    let error_body = serde_json::from_slice::<ErrorResponse>(&bytes).ok();
    let refused = error_body
        .as_ref()
        .is_some_and(|body| body.success == Some(false));
    if !status.is_success() || refused {
        let message = error_body
            .and_then(|body| body.reason())
            .unwrap_or_else(|| fallback.to_string());
        return Err(SubmissionError::new(message, Some(status)));
    }

    serde_json::from_slice(&bytes).map_err(|_| {
        let message = error_body
            .and_then(|body| body.reason())
            .unwrap_or_else(|| fallback.to_string());
        SubmissionError::new(message, Some(status))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_with_credential_tries_owner_first() {
        let credential = Credential::new("t", "42", "jane@x.com");
        let plan = lookup_plan(Some(&credential));
        assert_eq!(
            plan,
            vec![
                LookupStrategy::Owner {
                    token: "t".to_string()
                },
                LookupStrategy::Public
            ]
        );
    }

    #[test]
    fn plan_without_credential_is_public_only() {
        assert_eq!(lookup_plan(None), vec![LookupStrategy::Public]);
    }

    #[test]
    fn strategy_paths() {
        let owner = LookupStrategy::Owner {
            token: "t".to_string(),
        };
        assert_eq!(owner.path("abc"), "portfolios/abc");
        assert_eq!(LookupStrategy::Public.path("abc"), "p/abc");
        assert_eq!(owner.tier().to_string(), "owner");
    }

    #[test]
    fn strategy_debug_hides_token() {
        let owner = LookupStrategy::Owner {
            token: "secret".to_string(),
        };
        assert!(!format!("{owner:?}").contains("secret"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let url = Url::parse("http://127.0.0.1:8000/api/").unwrap();
        let client = CanvasClient::new(&url, None, Session::in_memory()).unwrap();
        assert_eq!(client.api_url("/login"), "http://127.0.0.1:8000/api/login");
    }
}
