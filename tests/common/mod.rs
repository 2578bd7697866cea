#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, Utc};
use shorturl_service::domain::access_policy::DEFAULT_ACCESS_POLICY;
use shorturl_service::domain::entities::SYSTEM_CREATOR;
use shorturl_service::domain::repositories::ShortUrlRepository;
use shorturl_service::domain::token_authority::TokenAuthority;
use shorturl_service::infrastructure::auth::JwtTokenAuthority;
use shorturl_service::infrastructure::persistence::InMemoryShortUrlRepository;
use shorturl_service::prelude::*;
use shorturl_service::routes::router;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const BASE_URL: &str = "http://short.test/url";

/// Everything a handler test needs: a server plus direct handles on the store
/// and the token authority.
pub struct TestApp {
    pub server: TestServer,
    pub repository: Arc<InMemoryShortUrlRepository>,
    pub authority: Arc<JwtTokenAuthority>,
}

impl TestApp {
    /// Signs a token for `role` with the secret the server verifies against.
    pub fn token(&self, role: &str) -> String {
        self.authority.issue("tester", role).unwrap()
    }

    pub fn bearer(&self, role: &str) -> String {
        format!("Bearer {}", self.token(role))
    }

    pub async fn seed(&self, code: &str, long_url: &str) -> ShortUrl {
        self.seed_with_expiry(code, long_url, None).await
    }

    pub async fn seed_with_expiry(
        &self,
        code: &str,
        long_url: &str,
        expiry_date: Option<DateTime<Utc>>,
    ) -> ShortUrl {
        self.repository
            .insert(NewShortUrl {
                short_url_id: code.to_string(),
                short_url: format!("{BASE_URL}/{code}"),
                long_url: long_url.to_string(),
                uri_name: None,
                expiry_date,
                user_name: None,
                email: None,
                created_by: SYSTEM_CREATOR.to_string(),
            })
            .await
            .unwrap()
    }
}

pub fn create_test_state(repository: Arc<InMemoryShortUrlRepository>) -> AppState {
    let authority = Arc::new(JwtTokenAuthority::new(TEST_SECRET, 3600));
    let policy = AccessPolicy::parse(DEFAULT_ACCESS_POLICY).unwrap();

    AppState::new(
        Arc::new(ShortenerService::new(repository, BASE_URL, 8)),
        Arc::new(AuthService::new(authority, policy)),
    )
}

pub fn create_test_app() -> TestApp {
    let repository = Arc::new(InMemoryShortUrlRepository::new());
    let state = create_test_state(repository.clone());

    TestApp {
        server: TestServer::new(router(state)).unwrap(),
        repository,
        authority: Arc::new(JwtTokenAuthority::new(TEST_SECRET, 3600)),
    }
}
