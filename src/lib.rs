// ============================================================================
// StockDash - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;       // Accès aux données (trait FetchApi + client du proxy)
pub mod app;       // Contrôleur du dashboard
pub mod config;    // Configuration (proxy + dashboard)
pub mod error;     // Types d'erreurs
pub mod models;    // Structures de données
pub mod proxy;     // Fonction proxy vers l'API FMP
pub mod scheduler; // Tâches planifiées (debounce, rafraîchissement)
pub mod ui;        // Rendu HTML + configuration du graphique

pub use app::Dashboard;
