// ============================================================================
// Collaborateurs d'affichage
// ============================================================================
// Le contrôleur ne manipule pas directement la page : il passe par ces
// traits, qui correspondent aux éléments fixes de la page
// (#ticker-list, #default-view, #selected-stock-view, #stock-header,
// #stock-info, #stock-chart).
//
// CONCEPT RUST : Trait objects
// - Arc<dyn View> : la vue est partagée entre le contrôleur et ses tâches
// - Send + Sync : les tâches tokio peuvent tourner sur d'autres threads
// ============================================================================

use crate::error::ChartError;
use crate::ui::chart::ChartConfig;

/// Surface de la page (équivalent des éléments du DOM)
pub trait View: Send + Sync {
    /// Remplace le contenu de la liste de tickers
    fn set_ticker_list(&self, html: &str);

    /// Active ou non l'animation de défilement de la liste
    fn set_ticker_scrolling(&self, scrolling: bool);

    /// Marque un ticker comme sélectionné (et retire la marque des autres)
    fn mark_selected(&self, symbol: &str);

    /// Cache le panneau par défaut et affiche le panneau de détail
    fn show_detail_view(&self);

    fn set_stock_header(&self, html: &str);

    fn set_stock_info(&self, html: &str);
}

/// Bibliothèque de graphiques
pub trait ChartSurface: Send + Sync {
    /// Crée un graphique sur le canvas #stock-chart
    fn create_chart(&self, config: &ChartConfig) -> Result<Box<dyn ChartInstance>, ChartError>;
}

/// Graphique vivant ; doit être détruit avant d'en créer un autre
pub trait ChartInstance: Send {
    fn destroy(self: Box<Self>);
}
