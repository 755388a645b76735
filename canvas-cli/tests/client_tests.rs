//! HTTP behaviour of the portfolio client against a mock API server.

use std::{sync::Arc, time::Duration};

use canvas_cli::{
    api::{
        CREATE_FAILED, CanvasClient, LOGIN_FAILED, LookupTier, MISSING_IDENTIFIER, PortfolioApi,
        PortfolioLookup, REGISTRATION_FAILED,
    },
    session::{CredentialStore, MemoryCredentialStore, Session},
};
use reqwest::StatusCode;
use serde_json::{Value, json};
use shared::models::{ContactDetails, Credential, EnvelopeShape, ProfileDraft, TemplateId};
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_partial_json, header, method, path},
};

fn client_for(server: &MockServer) -> (CanvasClient, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::default());
    let session = Session::load(store.clone()).unwrap();
    let url = Url::parse(&server.uri()).unwrap();
    let client = CanvasClient::new(&url, Some(Duration::from_secs(5)), session).unwrap();
    (client, store)
}

fn credential() -> Credential {
    Credential::new("t", "42", "jane@x.com")
}

fn draft() -> ProfileDraft {
    ProfileDraft {
        name: "Jane Doe".to_string(),
        skills: vec!["Design".to_string()],
        hobbies: Vec::new(),
        about: "I build things.".to_string(),
        contact_details: ContactDetails {
            email: "jane@x.com".to_string(),
            mobile: "5551234567".to_string(),
        },
    }
}

fn profile_json() -> Value {
    json!({
        "name": "Jane Doe",
        "skills": ["Design"],
        "hobbies": [],
        "about": "I build things.",
        "contactDetails": {"email": "jane@x.com", "mobile": "5551234567"}
    })
}

#[tokio::test]
async fn login_stores_credential_with_entered_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"email": "jane@x.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t",
            "token_type": "bearer",
            "user_id": "42"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    let credential = client.login("jane@x.com", "secret1").await.unwrap();

    assert_eq!(credential, self::credential());
    assert_eq!(client.session().credential(), Some(self::credential()));
    assert_eq!(store.load().unwrap(), Some(self::credential()));
}

#[tokio::test]
async fn login_failure_uses_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    let err = client.login("jane@x.com", "wrong-1").await.unwrap_err();

    assert_eq!(err.message, "Incorrect email or password");
    assert_eq!(err.status, Some(StatusCode::UNAUTHORIZED));
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn login_failure_without_reason_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client.login("jane@x.com", "secret1").await.unwrap_err();

    assert_eq!(err.message, LOGIN_FAILED);
    assert_eq!(err.status, Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn login_with_malformed_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_id": "42"})))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client.login("jane@x.com", "secret1").await.unwrap_err();
    assert_eq!(err.message, LOGIN_FAILED);
    assert_eq!(err.status, Some(StatusCode::OK));
}

#[tokio::test]
async fn network_failure_has_no_status() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let url = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();
    let client = CanvasClient::new(&url, Some(Duration::from_secs(5)), Session::in_memory()).unwrap();

    let err = client.login("jane@x.com", "secret1").await.unwrap_err();
    assert_eq!(err.message, LOGIN_FAILED);
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn register_with_token_skips_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "email": "jane@x.com",
            "password": "Abcdefg1",
            "full_name": "Jane Doe",
            "username": null
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "t", "user_id": "42"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let credential = client
        .register("Jane Doe", "jane@x.com", "Abcdefg1")
        .await
        .unwrap();
    assert_eq!(credential, self::credential());
}

#[tokio::test]
async fn register_acknowledgement_is_followed_by_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "User registered successfully",
            "data": {"user_id": "42"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"email": "jane@x.com", "password": "Abcdefg1"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "t", "user_id": "42"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    let credential = client
        .register("Jane Doe", "jane@x.com", "Abcdefg1")
        .await
        .unwrap();

    assert_eq!(credential, self::credential());
    assert_eq!(store.load().unwrap(), Some(self::credential()));
}

#[tokio::test]
async fn register_refusal_reports_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
        )
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client
        .register("Jane Doe", "jane@x.com", "Abcdefg1")
        .await
        .unwrap_err();
    assert_eq!(err.message, "Email already registered");
    assert_eq!(err.status, Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn register_without_reason_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client
        .register("Jane Doe", "jane@x.com", "Abcdefg1")
        .await
        .unwrap_err();
    assert_eq!(err.message, REGISTRATION_FAILED);
}

#[tokio::test]
async fn create_portfolio_sends_one_authorized_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/portfolios"))
        .and(header("Authorization", "Bearer t"))
        .and(body_partial_json(json!({
            "template": "modern",
            "data": {
                "name": "Jane Doe",
                "skills": ["Design"],
                "about": "I build things.",
                "contactDetails": {"email": "jane@x.com", "mobile": "5551234567"},
                "template_selected": "modern"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Portfolio created successfully",
            "data": {
                "portfolio_id": "65f0",
                "unique_identifier": "jane-doe-1a2b",
                "url": "/modern/jane-doe-1a2b"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let id = client
        .create_portfolio(TemplateId::Modern, &draft(), &credential())
        .await
        .unwrap();
    assert_eq!(id, "jane-doe-1a2b");
}

#[tokio::test]
async fn create_portfolio_without_identifier_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/portfolios"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {}})),
        )
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client
        .create_portfolio(TemplateId::Modern, &draft(), &credential())
        .await
        .unwrap_err();
    assert_eq!(err.message, MISSING_IDENTIFIER);
}

#[tokio::test]
async fn create_portfolio_refusal_uses_message_or_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/portfolios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Portfolio limit reached",
            "data": null
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/portfolios"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client
        .create_portfolio(TemplateId::Modern, &draft(), &credential())
        .await
        .unwrap_err();
    assert_eq!(err.message, "Portfolio limit reached");

    let err = client
        .create_portfolio(TemplateId::Modern, &draft(), &credential())
        .await
        .unwrap_err();
    assert_eq!(err.message, CREATE_FAILED);
    assert_eq!(err.status, Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn fetch_falls_back_to_public_after_owner_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/portfolios/jane-doe-1a2b"))
        .and(header("Authorization", "Bearer t"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/p/jane-doe-1a2b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "unique_identifier": "jane-doe-1a2b",
            "template": "old-aesthetic",
            "data": profile_json(),
            "is_published": true,
            "views": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let PortfolioLookup::Found(fetched) = client
        .fetch_portfolio("jane-doe-1a2b", Some(&credential()))
        .await
    else {
        panic!("expected the public tier to find the portfolio");
    };

    assert_eq!(fetched.tier, LookupTier::Public);
    assert_eq!(fetched.template, Some(TemplateId::OldAesthetic));
    assert_eq!(fetched.shape, EnvelopeShape::Wrapped);
    assert_eq!(fetched.profile, draft());
}

#[tokio::test]
async fn fetch_prefers_owner_tier() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/portfolios/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "65f0",
            "unique_identifier": "abc",
            "template": "modern",
            "data": profile_json()
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/p/abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let PortfolioLookup::Found(fetched) = client.fetch_portfolio("abc", Some(&credential())).await
    else {
        panic!("expected the owner tier to find the portfolio");
    };
    assert_eq!(fetched.tier, LookupTier::Owner);
    assert_eq!(fetched.identifier, "abc");
}

#[tokio::test]
async fn fetch_without_credential_only_asks_public_tier() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/portfolios/abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/p/abc"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "Portfolio not found or not published"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    assert_eq!(
        client.fetch_portfolio("abc", None).await,
        PortfolioLookup::NotFound
    );
}

#[tokio::test]
async fn fetch_accepts_bare_profiles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/p/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let PortfolioLookup::Found(fetched) = client.fetch_portfolio("abc", None).await else {
        panic!("expected a bare profile to resolve");
    };
    assert_eq!(fetched.shape, EnvelopeShape::Bare);
    assert_eq!(fetched.template, None);
    assert_eq!(fetched.profile.name, "Jane Doe");
}

#[tokio::test]
async fn malformed_lookup_bodies_count_as_misses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/portfolios/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/p/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    assert_eq!(
        client.fetch_portfolio("abc", Some(&credential())).await,
        PortfolioLookup::NotFound
    );
}
