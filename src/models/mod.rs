// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// Aucune donnée n'est persistée : chaque structure vit le temps d'un
// affichage et est re-téléchargée au rafraîchissement suivant.
// ============================================================================

pub mod stock;      // Entrée de la liste de tickers
pub mod quote;      // Cotation du jour + fiche société
pub mod historical; // Série de clôtures pour le graphique
pub mod detail;     // Agrégat quote + profile + historique

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use stockdash::models::quote::Quote;
// On peut faire : use stockdash::models::Quote;
pub use detail::StockDetail;
pub use historical::{HistoricalPoint, HistoricalSeries};
pub use quote::{Profile, Quote};
pub use stock::StockSummary;
