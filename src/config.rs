// ============================================================================
// Configuration
// ============================================================================
// Deux blocs de configuration :
// - ProxyConfig : côté serveur (clé API, URL upstream, adresse d'écoute)
// - DashboardConfig : côté client (liste populaire, debounce, polling)
//
// Les valeurs viennent des variables d'environnement, avec des valeurs par
// défaut pour tout sauf la clé API.
// ============================================================================

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

/// URL de base de l'API Financial Modeling Prep
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Adresse d'écoute par défaut du proxy
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8888";

/// Variables d'environnement lues par ProxyConfig::from_env
pub const ENV_API_KEY: &str = "FMP_API_KEY";
pub const ENV_BASE_URL: &str = "FMP_BASE_URL";
pub const ENV_BIND_ADDR: &str = "STOCKDASH_BIND";

/// Tickers affichés par défaut (liste populaire)
pub const POPULAR_SYMBOLS: [&str; 26] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "NVDA", "META", "JPM", "JNJ", "V", "WMT", "LMT",
    "UNH", "MA", "PG", "HD", "DIS", "BAC", "PFE", "KO", "XOM", "CVX", "ADBE", "CRM", "NFLX",
    "INTC",
];

/// Configuration de la fonction proxy
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    /// Clé FMP, ajoutée à chaque appel upstream (jamais renvoyée au client)
    pub api_key: String,

    /// URL de base upstream, sans slash final
    pub base_url: String,

    /// Adresse d'écoute du serveur HTTP
    pub bind_addr: SocketAddr,
}

impl ProxyConfig {
    /// Crée une configuration avec l'URL FMP et l'adresse par défaut
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            // Même valeur que DEFAULT_BIND_ADDR
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8888)),
        }
    }

    /// Remplace l'URL upstream (tests, miroir de l'API)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Lit la configuration depuis l'environnement du processus
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Lit la configuration via une fonction de lookup
    ///
    /// CONCEPT RUST : Injection de dépendance par closure
    /// - from_env() passe std::env::var
    /// - les tests passent une HashMap, sans toucher à l'environnement global
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .filter(|key| !key.trim().is_empty())
            .with_context(|| format!("{ENV_API_KEY} must be set to forward requests upstream"))?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }

        let bind = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid {ENV_BIND_ADDR} address: {bind}"))?;

        Ok(config)
    }
}

/// Configuration du contrôleur de dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Tickers de la liste populaire
    pub popular_symbols: Vec<String>,

    /// Délai de debounce de la recherche
    pub debounce: Duration,

    /// Période de rafraîchissement du ticker sélectionné
    pub refresh_interval: Duration,

    /// Nombre max de résultats de recherche
    pub search_limit: u32,

    /// Filtre d'exchanges passé à /search
    pub search_exchanges: String,

    /// Profondeur de l'historique (en jours de cotation)
    pub history_days: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            popular_symbols: POPULAR_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            debounce: Duration::from_millis(300),
            refresh_interval: Duration::from_millis(300_000),
            search_limit: 50,
            search_exchanges: "NASDAQ,NYSE".to_string(),
            history_days: 365,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = ProxyConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_from_lookup_requires_api_key() {
        assert!(ProxyConfig::from_lookup(lookup_from(&[])).is_err());
        assert!(ProxyConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "  ")])).is_err());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ProxyConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "k"),
            (ENV_BASE_URL, "http://localhost:9000/v3/"),
            (ENV_BIND_ADDR, "0.0.0.0:3000"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:9000/v3");
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn test_from_lookup_rejects_bad_bind() {
        let result = ProxyConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "k"),
            (ENV_BIND_ADDR, "not-an-address"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_dashboard_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.popular_symbols.len(), 26);
        assert_eq!(config.popular_symbols[0], "AAPL");
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.refresh_interval, Duration::from_secs(300));
    }
}
