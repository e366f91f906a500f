//! URL reachability checks used by the `active_url` rule

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::debug;

/// Answers "does this URL respond?"
#[async_trait]
pub trait ReachabilityCheck: Send + Sync {
    async fn is_reachable(&self, url: &str) -> bool;
}

/// Issues an HTTP GET; only a `200 OK` response counts as reachable
#[derive(Debug, Clone, Default)]
pub struct HttpReachability {
    client: reqwest::Client,
}

impl HttpReachability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxy, TLS roots, user agent)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReachabilityCheck for HttpReachability {
    async fn is_reachable(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                debug!(url, status = %response.status(), "URL responded without 200 OK");
                false
            }
            Err(error) => {
                debug!(url, %error, "URL could not be reached");
                false
            }
        }
    }
}

/// Fixed answer, for tests and offline setups
#[derive(Debug, Clone, Copy)]
pub struct StaticReachability(pub bool);

#[async_trait]
impl ReachabilityCheck for StaticReachability {
    async fn is_reachable(&self, _url: &str) -> bool {
        self.0
    }
}

/// Answers from a closure
pub struct FnReachability<F>(pub F);

#[async_trait]
impl<F> ReachabilityCheck for FnReachability<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    async fn is_reachable(&self, url: &str) -> bool {
        (self.0)(url)
    }
}

pub type SharedReachability = Arc<dyn ReachabilityCheck>;
