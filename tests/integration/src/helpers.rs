//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, minting access tokens and
//! making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use mentor_api::{create_app, create_app_state};
use mentor_common::{AppConfig, JwtService, TokenSubject};
use mentor_core::UserRole;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::fixtures::{unique_suffix, CreateMentorRequest, MentorBody, Persona, UserBody};

/// Secret used when the environment does not provide one
const FALLBACK_JWT_SECRET: &str = "integration-test-secret";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let jwt = JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry,
            config.jwt.issuer.clone(),
        );

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            jwt,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Mint a token the way the identity provider would
    pub fn token_for(&self, user_id: Uuid, role: UserRole, email: &str) -> Result<String> {
        let subject = TokenSubject {
            user_id,
            role,
            email: email.to_string(),
            name: None,
        };
        Ok(self.jwt.issue_access_token(&subject)?)
    }

    /// A fresh caller whose profile has been synced into the user table
    pub async fn persona(&self, role: UserRole) -> Result<Persona> {
        let user_id = Uuid::new_v4();
        let email = format!("{role}{}@example.com", unique_suffix());
        let token = self.token_for(user_id, role, &email)?;

        let body = serde_json::json!({ "name": format!("Test {role}") });
        let response = self.put_auth("/api/v1/users/@me", &token, &body).await?;
        let user: UserBody = assert_json(response, StatusCode::OK).await?;

        Ok(Persona { user, token })
    }

    /// A mentor persona with a published profile
    pub async fn mentor(&self) -> Result<(Persona, MentorBody)> {
        let persona = self.persona(UserRole::Mentor).await?;
        let response = self
            .post_auth("/api/v1/mentors", &persona.token, &CreateMentorRequest::unique())
            .await?;
        let mentor: MentorBody = assert_json(response, StatusCode::CREATED).await?;
        Ok((persona, mentor))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a bodiless POST request with auth token
    pub async fn post_empty(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }
}

/// Create a test configuration
///
/// Reads the environment, applies migrations on start-up and lifts the rate
/// limit so parallel tests do not trip it.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_lookup(|key| match key {
        "API_PORT" => Some("0".to_string()),
        "DATABASE_RUN_MIGRATIONS" => Some("true".to_string()),
        "RATE_LIMIT_REQUESTS_PER_SECOND" | "RATE_LIMIT_BURST" => Some("1000".to_string()),
        "JWT_SECRET" => std::env::var(key)
            .ok()
            .or_else(|| Some(FALLBACK_JWT_SECRET.to_string())),
        _ => std::env::var(key).ok(),
    })
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert an error response and return its `error.message`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    Ok(body["error"]["message"].as_str().unwrap_or_default().to_string())
}
