// ============================================================================
// Structures : Quote et Profile
// ============================================================================
// Quote : cotation du jour renvoyée par /quote/{symbol}
// Profile : fiche société renvoyée par /profile/{symbol}
//
// CONCEPTS RUST :
// 1. #[serde(rename_all = "camelCase")] : "dayHigh" (JSON) -> day_high (Rust)
// 2. Champs obligatoires vs Option : si un champ obligatoire manque,
//    la désérialisation échoue et l'affichage signale des données incomplètes
// ============================================================================

use serde::{Deserialize, Serialize};

/// Cotation du jour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Dernier prix
    pub price: f64,

    pub day_high: f64,
    pub day_low: f64,
    pub open: f64,

    /// Variation absolue du jour
    pub change: f64,

    /// Variation du jour en pourcentage (ex: -0.45 pour -0.45%)
    pub changes_percentage: f64,

    pub volume: f64,
}

impl Quote {
    /// Hausse ou stabilité sur la journée
    ///
    /// Une variation nulle compte comme positive (vert)
    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }

    /// Volume en millions de titres
    pub fn volume_millions(&self) -> f64 {
        self.volume / 1e6
    }
}

/// Fiche société
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub symbol: String,

    pub company_name: String,

    /// FMP renvoie null pour certains ETF / ADR
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub sector: Option<String>,

    #[serde(default)]
    pub industry: Option<String>,

    /// Capitalisation boursière en dollars
    pub mkt_cap: f64,
}

impl Profile {
    /// Capitalisation en milliards de dollars
    pub fn market_cap_billions(&self) -> f64 {
        self.mkt_cap / 1e9
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quote_from_fmp_json() {
        let quote: Quote = serde_json::from_value(json!({
            "symbol": "AAPL",
            "name": "Apple Inc.",
            "price": 189.84,
            "changesPercentage": -0.45,
            "change": -1.23,
            "dayLow": 188.5,
            "dayHigh": 191.2,
            "open": 190.0,
            "volume": 52_340_000,
            "marketCap": 2_950_000_000_000u64
        }))
        .unwrap();

        assert_eq!(quote.symbol, "AAPL");
        assert!(!quote.is_positive());
        assert!((quote.volume_millions() - 52.34).abs() < 1e-9);
    }

    #[test]
    fn test_zero_change_is_positive() {
        let quote: Quote = serde_json::from_value(json!({
            "symbol": "KO", "price": 60.0, "changesPercentage": 0.0, "change": 0.0,
            "dayLow": 59.0, "dayHigh": 61.0, "open": 60.0, "volume": 1000
        }))
        .unwrap();
        assert!(quote.is_positive());
    }

    #[test]
    fn test_profile_nullable_fields() {
        let profile: Profile = serde_json::from_value(json!({
            "symbol": "SPY",
            "companyName": "SPDR S&P 500 ETF Trust",
            "description": null,
            "sector": null,
            "mktCap": 500_000_000_000u64
        }))
        .unwrap();

        assert!(profile.description.is_none());
        assert!(profile.industry.is_none());
        assert!((profile.market_cap_billions() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_quote_missing_price_fails() {
        let result: Result<Quote, _> =
            serde_json::from_value(json!({"symbol": "AAPL", "change": 1.0}));
        assert!(result.is_err());
    }
}
