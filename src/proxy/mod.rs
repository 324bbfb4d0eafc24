// ============================================================================
// Module : proxy
// ============================================================================
// Fonction proxy exposée en HTTP avec axum.
//
// GET /.netlify/functions/fetchAPI?endpoint=<chemin upstream encodé>
// GET /api/fetch?endpoint=...                (alias)
//
// Les autres paramètres de la query string sont ignorés.
// ============================================================================

pub mod forwarder; // Construction de l'URL upstream et relais de la réponse

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ProxyConfig;

pub use forwarder::{upstream_url, ProxyForwarder, ProxyResponse, MISSING_ENDPOINT, UPSTREAM_FAILURE};

/// Chemin historique de la fonction (compatible avec le client d'origine)
pub const FUNCTION_PATH: &str = "/.netlify/functions/fetchAPI";

/// Alias plus court
pub const ALIAS_PATH: &str = "/api/fetch";

/// Paramètres de la requête proxy
#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

/// Construit le routeur de la fonction proxy
pub fn router(forwarder: Arc<ProxyForwarder>) -> Router {
    Router::new()
        .route(FUNCTION_PATH, get(fetch_api))
        .route(ALIAS_PATH, get(fetch_api))
        .layer(TraceLayer::new_for_http())
        .with_state(forwarder)
}

async fn fetch_api(
    State(forwarder): State<Arc<ProxyForwarder>>,
    Query(query): Query<ProxyQuery>,
) -> ProxyResponse {
    forwarder.forward(query.endpoint.as_deref()).await
}

/// Lance le serveur HTTP jusqu'à Ctrl+C
pub async fn serve(config: &ProxyConfig) -> Result<()> {
    let forwarder = Arc::new(ProxyForwarder::new(config).context("Failed to build HTTP client")?);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, path = FUNCTION_PATH, "Proxy listening");

    axum::serve(listener, router(forwarder))
        .with_graceful_shutdown(async {
            // Si le handler ne peut pas être installé, on tourne jusqu'au kill
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await
        .context("Proxy server failed")?;

    info!("Proxy stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let config = ProxyConfig::new("KEY").with_base_url("http://127.0.0.1:9");
        router(Arc::new(ProxyForwarder::new(&config).unwrap()))
    }

    async fn call(uri: &str) -> (StatusCode, Value) {
        let response = test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_endpoint_ignores_other_params() {
        for uri in [
            "/.netlify/functions/fetchAPI",
            "/.netlify/functions/fetchAPI?symbol=AAPL&limit=5",
            "/api/fetch?endpoint=",
        ] {
            let (status, body) = call(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({"error": "API endpoint is required"}));
        }
    }

    #[tokio::test]
    async fn test_transport_failure_through_router() {
        let (status, body) = call("/api/fetch?endpoint=%2Fquote%2FAAPL").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to fetch data from FMP API"}));
    }
}
