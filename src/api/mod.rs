// ============================================================================
// Module : api
// ============================================================================
// Accès aux données financières côté dashboard.
//
// CONCEPT RUST : Trait comme point de couture
// - FetchApi abstrait "donne-moi le JSON de cet endpoint"
// - ProxyClient l'implémente en HTTP (via la fonction proxy)
// - ProxyForwarder (module proxy) l'implémente en direct, dans le processus
// - Les tests l'implémentent avec des réponses en mémoire
// ============================================================================

pub mod client;    // Client HTTP vers la fonction proxy
pub mod endpoints; // Construction des chemins upstream

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;

// Re-export des éléments principaux
pub use client::ProxyClient;

/// Source de données JSON pour le dashboard
#[async_trait]
pub trait FetchApi: Send + Sync {
    /// Récupère le JSON d'un endpoint upstream (ex: "/quote/AAPL")
    ///
    /// Un statut non-succès devient ApiError::Status
    async fn fetch(&self, endpoint: &str) -> Result<Value, ApiError>;
}

/// Message d'erreur d'une réponse non-succès
///
/// Reprend le champ `error` du corps JSON s'il existe, sinon
/// "API Error: <status>".
pub fn error_message(status: u16, body: Option<&Value>) -> String {
    body.and_then(|b| b.get("error"))
        .and_then(Value::as_str)
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("API Error: {status}"))
}
