// ============================================================================
// API Client : fonction proxy
// ============================================================================
// Le dashboard ne connaît pas la clé API : il appelle la fonction proxy avec
// le chemin upstream dans le paramètre "endpoint", et le proxy fait le reste.
//
// CONCEPTS RUST :
// 1. async/await : programmation asynchrone (non-bloquante)
// 2. reqwest::Client : réutilisé entre les appels (pool de connexions)
// 3. #[instrument] : span tracing avec l'endpoint demandé
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::api::{error_message, FetchApi};
use crate::error::ApiError;

/// Client HTTP vers la fonction proxy
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,

    /// URL complète de la fonction (ex: http://127.0.0.1:8888/.netlify/functions/fetchAPI)
    function_url: String,
}

impl ProxyClient {
    /// Crée un client pour la fonction proxy à `function_url`
    pub fn new(function_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("stockdash/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            function_url: function_url.into(),
        })
    }
}

#[async_trait]
impl FetchApi for ProxyClient {
    /// Appelle la fonction proxy pour `endpoint`
    ///
    /// CONCEPT : Gestion des erreurs HTTP
    /// - statut non-succès : on lit le corps JSON pour récupérer `error`
    /// - corps illisible : message générique "API Error: <status>"
    #[instrument(skip(self))]
    async fn fetch(&self, endpoint: &str) -> Result<Value, ApiError> {
        // reqwest encode le paramètre (équivalent de encodeURIComponent)
        let response = self
            .http
            .get(&self.function_url)
            .query(&[("endpoint", endpoint)])
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Received proxy response");

        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            let message = error_message(status.as_u16(), body.as_ref());
            error!(status = %status, %message, "Proxy returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
// On lance un vrai proxy (routeur axum) devant un faux upstream, tous deux
// sur des ports éphémères : aucun appel réseau externe.
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    use crate::config::ProxyConfig;
    use crate::proxy::{self, ProxyForwarder};

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn proxy_in_front_of_upstream() -> ProxyClient {
        let upstream = spawn(
            Router::new()
                .route("/quote/AAPL", get(|| async { Json(json!([{"symbol": "AAPL"}])) }))
                .route(
                    "/missing",
                    get(|| async { (StatusCode::NOT_FOUND, Json(json!({"msg": "not found"}))) }),
                ),
        )
        .await;

        let config = ProxyConfig::new("test-key").with_base_url(upstream);
        let forwarder = Arc::new(ProxyForwarder::new(&config).unwrap());
        let proxy_base = spawn(proxy::router(forwarder)).await;

        ProxyClient::new(format!("{proxy_base}{}", proxy::FUNCTION_PATH)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_through_proxy() {
        let client = proxy_in_front_of_upstream().await;
        let value = client.fetch("/quote/AAPL").await.unwrap();
        assert_eq!(value, json!([{"symbol": "AAPL"}]));
    }

    #[tokio::test]
    async fn test_upstream_error_becomes_status_error() {
        let client = proxy_in_front_of_upstream().await;
        let err = client.fetch("/missing").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "API Error: 404");
    }

    #[tokio::test]
    async fn test_proxy_error_field_is_surfaced() {
        let client = proxy_in_front_of_upstream().await;
        let err = client.fetch("").await.unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "API endpoint is required");
    }
}
