// ============================================================================
// Endpoints upstream
// ============================================================================
// Chemins relatifs à l'URL de base FMP, passés tels quels au proxy dans le
// paramètre "endpoint". Le proxy ajoute la clé API.
// ============================================================================

/// Cotations de plusieurs tickers en un appel : /quote/AAPL,MSFT,...
pub fn quotes<S: AsRef<str>>(symbols: &[S]) -> String {
    let joined: Vec<&str> = symbols.iter().map(|s| s.as_ref()).collect();
    format!("/quote/{}", joined.join(","))
}

pub fn quote(symbol: &str) -> String {
    format!("/quote/{symbol}")
}

pub fn profile(symbol: &str) -> String {
    format!("/profile/{symbol}")
}

/// Historique journalier limité à `days` séances
pub fn historical(symbol: &str, days: u32) -> String {
    format!("/historical-price-full/{symbol}?timeseries={days}")
}

/// Recherche de symboles ; la requête est encodée pour l'URL
pub fn search(query: &str, limit: u32, exchanges: &str) -> String {
    format!(
        "/search?query={}&limit={limit}&exchange={exchanges}",
        urlencoding::encode(query)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_joins_symbols() {
        assert_eq!(quotes(&["AAPL", "MSFT"]), "/quote/AAPL,MSFT");
        assert_eq!(quotes(&vec!["KO".to_string()]), "/quote/KO");
    }

    #[test]
    fn test_historical_one_year() {
        assert_eq!(
            historical("TSLA", 365),
            "/historical-price-full/TSLA?timeseries=365"
        );
    }

    #[test]
    fn test_search_encodes_query() {
        assert_eq!(
            search("BRK B&", 50, "NASDAQ,NYSE"),
            "/search?query=BRK%20B%26&limit=50&exchange=NASDAQ,NYSE"
        );
    }
}
