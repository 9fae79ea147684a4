use super::types::{ErrorBody, SignInRequest, SignUpRequest, TokenResponse};
use crate::config::{with_trailing_slash, AppConfig};
use crate::error::AuthError;
use crate::in_flight::InFlightCounter;
use crate::search::ResultsRoute;
use crate::storage::KeyValueStore;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

pub const TOKEN_KEY: &str = "access_token";

#[derive(Debug, Clone, Copy)]
enum Flow {
    SignIn,
    SignUp,
}

impl Flow {
    fn path(self) -> &'static str {
        match self {
            Flow::SignIn => "auth/signin",
            Flow::SignUp => "auth/signup",
        }
    }

    fn rejected_fallback(self) -> &'static str {
        match self {
            Flow::SignIn => "Sign in failed",
            Flow::SignUp => "Signup failed",
        }
    }

    fn network_message(self) -> &'static str {
        match self {
            Flow::SignIn => "An error occurred during sign in.",
            Flow::SignUp => "An error occurred during sign up.",
        }
    }
}

/// Client for the external auth API. A returned token is kept in local
/// storage under [`TOKEN_KEY`].
pub struct AuthClient<S> {
    client: Client,
    base_url: Option<Url>,
    store: S,
    loading: InFlightCounter,
}

impl<S: KeyValueStore> AuthClient<S> {
    pub fn new(base_url: Option<Url>, store: S) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.map(with_trailing_slash),
            store,
            loading: InFlightCounter::new(),
        })
    }

    pub fn from_config(config: &AppConfig, store: S) -> Result<Self> {
        Self::new(config.api_base_url.clone(), store)
    }

    /// Submit buttons are disabled while a request is out
    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    pub fn stored_token(&self) -> Result<Option<String>> {
        self.store.get(TOKEN_KEY)
    }

    /// Sign in; on success the token is stored and the results page is the
    /// next destination
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<ResultsRoute, AuthError> {
        self.submit(Flow::SignIn, &SignInRequest { email, password }).await
    }

    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<ResultsRoute, AuthError> {
        self.submit(Flow::SignUp, request).await
    }

    async fn submit<B: Serialize + Sync>(&self, flow: Flow, body: &B) -> Result<ResultsRoute, AuthError> {
        let base = self.base_url.as_ref().ok_or(AuthError::NotConfigured)?;
        let url = base
            .join(flow.path())
            .map_err(|_| AuthError::NotConfigured)?;

        let result = {
            let _guard = self.loading.enter();
            self.post(flow, url, body).await
        };

        match &result {
            Ok(_) => info!("✅ {:?} succeeded", flow),
            Err(e) => warn!("{:?} failed: {}", flow, e),
        }
        result
    }

    async fn post<B: Serialize + Sync>(&self, flow: Flow, url: Url, body: &B) -> Result<ResultsRoute, AuthError> {
        let network = |source| AuthError::Network {
            message: flow.network_message(),
            source,
        };

        debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await.map_err(network)?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message())
                .unwrap_or_else(|| flow.rejected_fallback().to_string());
            debug!("Auth API returned {}: {}", status, message);
            return Err(AuthError::Rejected(message));
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(network)?
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::Rejected(flow.rejected_fallback().to_string()))?;

        self.store.set(TOKEN_KEY, &token).map_err(AuthError::Storage)?;
        Ok(ResultsRoute::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::time::Duration;

    #[tokio::test]
    async fn test_unconfigured_client_fails_without_request() {
        let client = AuthClient::new(None, MemoryStore::new()).unwrap();
        let err = client.sign_in("a@b.c", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::NotConfigured));
        assert!(!client.is_loading());
        assert_eq!(client.stored_token().unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let base = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();
        let client = AuthClient::new(Some(base), MemoryStore::new()).unwrap();

        let err = client.sign_in("a@b.c", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "An error occurred during sign in.");
        assert!(!client.is_loading());
    }

    #[tokio::test]
    async fn test_cancelled_sign_in_clears_loading() {
        // Accepts connections and never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });
        let client = AuthClient::new(Some(base), MemoryStore::new()).unwrap();

        let pending = tokio::time::timeout(Duration::from_millis(100), client.sign_in("a@b.c", "pw")).await;
        assert!(pending.is_err());
        assert!(!client.is_loading());
        server.abort();
    }

    #[tokio::test]
    async fn test_loading_stays_set_until_last_request_finishes() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });
        let client = AuthClient::new(Some(base), MemoryStore::new()).unwrap();

        let slow = client.sign_in("a@b.c", "pw");
        let check = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            // Second request ends at once, the first is still waiting
            let _ = tokio::time::timeout(Duration::from_millis(10), client.sign_in("d@e.f", "pw")).await;
            client.is_loading()
        };
        tokio::select! {
            _ = slow => panic!("stub server never answers"),
            still_loading = check => assert!(still_loading),
        }
        assert!(!client.is_loading());
        server.abort();
    }
}
