// ============================================================================
// Forwarder : appel upstream avec la clé API
// ============================================================================
// Un seul aller-retour par requête :
// 1. endpoint absent ou vide      -> 400 {"error": "API endpoint is required"}
// 2. appel upstream impossible    -> 500 {"error": "Failed to fetch data from FMP API"}
// 3. statut upstream non-succès   -> même statut, même corps (passthrough)
// 4. succès                       -> 200 + corps upstream
//
// Pas de retry, pas de timeout en dehors des défauts de reqwest.
// ============================================================================

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument, warn};

use crate::api::{error_message, FetchApi};
use crate::config::ProxyConfig;
use crate::error::ApiError;

/// Message renvoyé quand `endpoint` manque
pub const MISSING_ENDPOINT: &str = "API endpoint is required";

/// Message générique renvoyé sur échec de transport
pub const UPSTREAM_FAILURE: &str = "Failed to fetch data from FMP API";

/// Construit l'URL upstream : base + endpoint + ('&' ou '?') + apikey
///
/// L'endpoint peut déjà porter une query string (ex: "/search?query=AA") ;
/// dans ce cas la clé est ajoutée avec '&'.
pub fn upstream_url(base_url: &str, endpoint: &str, api_key: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{base_url}{endpoint}{separator}apikey={api_key}")
}

/// Réponse de la fonction proxy (statut + corps JSON)
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: Value,
}

impl ProxyResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// Réponse d'erreur au format {"error": "..."}
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fonction proxy : détient la clé API et relaie vers l'upstream
#[derive(Debug, Clone)]
pub struct ProxyForwarder {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ProxyForwarder {
    pub fn new(config: &ProxyConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("stockdash-proxy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Traite une requête proxy
    ///
    /// CONCEPT : L'URL complète contient la clé, on ne la logge jamais ;
    /// seul l'endpoint apparaît dans les spans.
    #[instrument(skip(self))]
    pub async fn forward(&self, endpoint: Option<&str>) -> ProxyResponse {
        let Some(endpoint) = endpoint.filter(|e| !e.is_empty()) else {
            warn!("Rejected proxy request without endpoint");
            return ProxyResponse::error(400, MISSING_ENDPOINT);
        };

        let url = upstream_url(&self.base_url, endpoint, &self.api_key);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e.without_url(), "Upstream request failed");
                return ProxyResponse::error(500, UPSTREAM_FAILURE);
            }
        };

        let status = response.status().as_u16();
        debug!(status, "Received upstream response");

        // Un corps non-JSON est traité comme un échec de transport
        let body = match response.json::<Value>().await {
            Ok(body) => body,
            Err(e) => {
                error!(status, error = %e.without_url(), "Upstream body is not JSON");
                return ProxyResponse::error(500, UPSTREAM_FAILURE);
            }
        };

        if !(200..300).contains(&status) {
            warn!(status, "Relaying upstream error status");
            return ProxyResponse { status, body };
        }

        info!("Upstream request succeeded");
        ProxyResponse::ok(body)
    }
}

/// Utilisation en direct, sans passer par HTTP (commande `render`)
#[async_trait]
impl FetchApi for ProxyForwarder {
    async fn fetch(&self, endpoint: &str) -> Result<Value, ApiError> {
        let response = self.forward(Some(endpoint)).await;
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(ApiError::Status {
                status: response.status,
                message: error_message(response.status, Some(&response.body)),
            })
        }
    }
}
