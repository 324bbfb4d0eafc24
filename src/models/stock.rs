// ============================================================================
// Structure : StockSummary
// ============================================================================
// Une entrée de la liste de tickers (liste populaire ou résultats de recherche)
//
// L'endpoint /quote renvoie "name", l'endpoint /search aussi, mais certains
// retours n'ont que "companyName" : on garde les deux et on choisit à
// l'affichage.
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Ticker affiché dans la liste (symbole + nom)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    /// Symbole du ticker (ex: "AAPL")
    pub symbol: String,

    /// Nom court (ex: "Apple Inc.")
    #[serde(default)]
    pub name: Option<String>,

    /// Nom de la société, utilisé si `name` est absent ou vide
    #[serde(default)]
    pub company_name: Option<String>,
}

impl StockSummary {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: Some(name.into()),
            company_name: None,
        }
    }

    /// Nom à afficher : `name`, sinon `companyName`, sinon chaîne vide
    ///
    /// CONCEPT RUST : Option chaining
    /// - .filter() écarte les noms vides
    /// - .or_else() essaie la seconde source
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.company_name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or("")
    }

    /// Convertit une réponse JSON en liste de tickers
    ///
    /// - Un JSON qui n'est pas un tableau donne une liste vide (FMP répond
    ///   parfois 200 avec un objet d'erreur)
    /// - Les entrées sans symbole sont ignorées
    pub fn list_from_json(value: Value) -> Vec<Self> {
        let Value::Array(items) = value else {
            return Vec::new();
        };

        let total = items.len();
        let stocks: Vec<Self> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();

        if stocks.len() < total {
            warn!(
                skipped = total - stocks.len(),
                total, "Skipped list entries without a symbol"
            );
        }

        stocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name_fallback() {
        let stock: StockSummary =
            serde_json::from_value(json!({"symbol": "AAPL", "companyName": "Apple Inc."})).unwrap();
        assert_eq!(stock.display_name(), "Apple Inc.");

        let stock: StockSummary =
            serde_json::from_value(json!({"symbol": "AAPL", "name": "", "companyName": "Apple"}))
                .unwrap();
        assert_eq!(stock.display_name(), "Apple");

        let stock: StockSummary = serde_json::from_value(json!({"symbol": "X"})).unwrap();
        assert_eq!(stock.display_name(), "");
    }

    #[test]
    fn test_list_from_json() {
        let value = json!([
            {"symbol": "AAPL", "name": "Apple Inc.", "price": 190.1},
            {"name": "no symbol"},
            {"symbol": "MSFT", "name": null}
        ]);

        let stocks = StockSummary::list_from_json(value);
        assert_eq!(stocks.len(), 2);
        assert_eq!(stocks[0].symbol, "AAPL");
        assert_eq!(stocks[1].symbol, "MSFT");
    }

    #[test]
    fn test_list_from_non_array() {
        let value = json!({"Error Message": "Limit Reach"});
        assert!(StockSummary::list_from_json(value).is_empty());
    }
}
