// ============================================================================
// Structure : StockDetail
// ============================================================================
// Regroupe les trois réponses nécessaires au panneau de détail :
// quote[0], profile[0] et historical (inversé en ordre chronologique)
// ============================================================================

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::DisplayError;
use crate::models::{HistoricalPoint, HistoricalSeries, Profile, Quote};

/// Enveloppe de /historical-price-full/{symbol}
#[derive(Debug, Deserialize)]
struct HistoricalResponse {
    historical: Vec<HistoricalPoint>,
}

/// Données complètes d'un ticker sélectionné
#[derive(Debug, Clone, PartialEq)]
pub struct StockDetail {
    pub quote: Quote,
    pub profile: Profile,
    pub history: HistoricalSeries,
}

impl StockDetail {
    /// Valide et convertit les trois réponses brutes
    ///
    /// Toute absence (tableau vide, champ manquant, mauvais type) donne
    /// DisplayError::IncompleteData pour ce symbole.
    pub fn from_responses(
        symbol: &str,
        quote: Value,
        profile: Value,
        historical: Value,
    ) -> Result<Self, DisplayError> {
        let incomplete = || DisplayError::IncompleteData {
            symbol: symbol.to_string(),
        };

        let quote: Quote = first_element(quote)
            .and_then(|v| serde_json::from_value(v).ok())
            .ok_or_else(incomplete)?;

        let profile: Profile = first_element(profile)
            .and_then(|v| serde_json::from_value(v).ok())
            .ok_or_else(incomplete)?;

        let historical: HistoricalResponse = serde_json::from_value(historical).map_err(|e| {
            debug!(%symbol, error = %e, "Historical payload rejected");
            incomplete()
        })?;

        Ok(Self {
            quote,
            profile,
            history: HistoricalSeries::from_descending(symbol, historical.historical),
        })
    }
}

/// Premier élément d'un tableau JSON, None sinon
fn first_element(value: Value) -> Option<Value> {
    match value {
        Value::Array(items) => items.into_iter().next(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quote() -> Value {
        json!([{
            "symbol": "AAPL", "price": 190.0, "changesPercentage": 1.5, "change": 2.8,
            "dayLow": 187.0, "dayHigh": 191.0, "open": 188.0, "volume": 50_000_000
        }])
    }

    fn profile() -> Value {
        json!([{
            "symbol": "AAPL", "companyName": "Apple Inc.", "description": "Phones.",
            "sector": "Technology", "industry": "Consumer Electronics", "mktCap": 2.9e12
        }])
    }

    #[test]
    fn test_from_responses_ok() {
        let historical = json!({
            "symbol": "AAPL",
            "historical": [
                {"date": "2024-01-03", "close": 3.0},
                {"date": "2024-01-02", "close": 2.0}
            ]
        });

        let detail = StockDetail::from_responses("AAPL", quote(), profile(), historical).unwrap();
        assert_eq!(detail.profile.company_name, "Apple Inc.");
        assert_eq!(detail.history.closes(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_empty_history_is_accepted() {
        let historical = json!({"symbol": "AAPL", "historical": []});
        let detail = StockDetail::from_responses("AAPL", quote(), profile(), historical).unwrap();
        assert!(detail.history.is_empty());
    }

    #[test]
    fn test_missing_pieces_are_incomplete() {
        let history = json!({"historical": []});

        let cases = [
            (json!([]), profile(), history.clone()),
            (quote(), json!({"Error Message": "Limit Reach"}), history.clone()),
            (quote(), profile(), json!({})),
            (json!([{"symbol": "AAPL"}]), profile(), history),
        ];

        for (q, p, h) in cases {
            let err = StockDetail::from_responses("XYZ", q, p, h).unwrap_err();
            assert!(matches!(err, DisplayError::IncompleteData { ref symbol } if symbol == "XYZ"));
        }
    }
}
