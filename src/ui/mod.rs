// ============================================================================
// Module : ui
// ============================================================================
// Rendu du dashboard : fragments HTML, configuration du graphique, et traits
// des collaborateurs d'affichage (page + bibliothèque de graphiques).
// ============================================================================

pub mod view;        // Traits View / ChartSurface / ChartInstance
pub mod ticker_list; // Liste de tickers (populaire ou résultats)
pub mod detail;      // En-tête + grille d'informations
pub mod chart;       // Configuration du graphique de cours
pub mod page;        // Page statique en mémoire (commande render)

use std::borrow::Cow;

// Re-exports pour simplifier les imports
pub use chart::{build_chart_config, ChartConfig};
pub use page::StaticPage;
pub use ticker_list::{render_ticker_list, TickerList};
pub use view::{ChartInstance, ChartSurface, View};

/// Échappe le texte inséré dans le HTML
///
/// CONCEPT RUST : Cow (Clone on Write)
/// - pas d'allocation si le texte ne contient aucun caractère spécial
/// - String allouée seulement quand il faut remplacer
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert!(matches!(escape_html("Apple Inc."), Cow::Borrowed("Apple Inc.")));
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
