// ============================================================================
// Liste de tickers
// ============================================================================
// Rendu HTML de la colonne de tickers.
//
// Avec le défilement actif, la liste est rendue deux fois à la suite : quand
// l'animation CSS arrive au bout de la première copie, la seconde prend le
// relais sans saut visible.
// ============================================================================

use crate::models::StockSummary;
use crate::ui::{escape_html, View};

/// Liste vide
pub const NO_STOCKS: &str = r#"<div class="p-4 text-center text-[#8b949e]">No stocks to display.</div>"#;

/// Recherche en cours
pub const SEARCHING: &str = r#"<div class="p-4 text-center text-[#8b949e]">Searching...</div>"#;

/// Recherche sans résultat
pub const NO_RESULTS: &str = r#"<div class="p-4 text-center text-[#8b949e]">No results found.</div>"#;

/// Échec de la recherche
pub const SEARCH_FAILED: &str = r#"<div class="p-4 text-red-500">Search failed. Please try again.</div>"#;

/// Échec du chargement de la liste populaire
pub const LOAD_FAILED: &str = r#"<div class="p-4 text-red-500">Error loading symbols.</div>"#;

/// Résultat du rendu de la liste
#[derive(Debug, Clone, PartialEq)]
pub struct TickerList {
    pub html: String,

    /// Some(état) pour changer la classe de défilement, None pour la laisser
    pub scrolling: Option<bool>,
}

impl TickerList {
    /// Applique le rendu à la vue
    pub fn apply(&self, view: &dyn View) {
        view.set_ticker_list(&self.html);
        if let Some(scrolling) = self.scrolling {
            view.set_ticker_scrolling(scrolling);
        }
    }
}

/// Rend un ticker cliquable, identifié par `data-symbol`
pub fn render_ticker_item(stock: &StockSummary) -> String {
    let symbol = escape_html(&stock.symbol);
    format!(
        concat!(
            r#"<div class="ticker-item-vertical p-4 border-b border-[#21262d] cursor-pointer" data-symbol="{symbol}">"#,
            r#"<span class="ticker-symbol font-bold text-lg text-[#8b949e]">{symbol}</span>"#,
            r#"<span class="text-xs text-[#484f58] block truncate">{name}</span>"#,
            "</div>"
        ),
        symbol = symbol,
        name = escape_html(stock.display_name()),
    )
}

/// Ajoute la classe `selected` aux items de `symbol` (les deux copies si la
/// liste défile) ; les autres items restent sans marque
pub fn with_selection(html: &str, symbol: &str) -> String {
    let symbol = escape_html(symbol);
    html.replace(
        &format!(r#"cursor-pointer" data-symbol="{symbol}""#),
        &format!(r#"cursor-pointer selected" data-symbol="{symbol}""#),
    )
}

/// Rend la liste complète
///
/// - liste vide : message fixe, classe de défilement inchangée
/// - `should_scroll` : liste doublée + classe de défilement
pub fn render_ticker_list(stocks: &[StockSummary], should_scroll: bool) -> TickerList {
    if stocks.is_empty() {
        return TickerList {
            html: NO_STOCKS.to_string(),
            scrolling: None,
        };
    }

    let items: String = stocks.iter().map(render_ticker_item).collect();

    let html = if should_scroll {
        items.repeat(2)
    } else {
        items
    };

    TickerList {
        html,
        scrolling: Some(should_scroll),
    }
}
