// ============================================================================
// Structure : Dashboard
// ============================================================================
// Contrôleur unique du dashboard : il reçoit les événements de la page
// (saisie de recherche, clic sur un ticker), appelle l'API et pousse le rendu
// vers la vue et la surface graphique.
//
// CONCEPTS RUST :
// 1. State Management : tout l'état mutable est dans SelectionState
// 2. Arc<Inner> : le contrôleur est partagé avec ses tâches planifiées
// 3. Weak : les tâches ne gardent pas le contrôleur en vie
// 4. Mutex jamais tenu pendant un .await
//
// PATTERN : jetons de génération
// - chaque requête de liste / de détail incrémente un compteur
// - à la réception, une réponse dont le compteur n'est plus le dernier est
//   ignorée : la dernière requête émise gagne, pas la dernière arrivée
// ============================================================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, error, info, instrument};

use crate::api::{endpoints, FetchApi};
use crate::config::DashboardConfig;
use crate::error::DisplayError;
use crate::models::{StockDetail, StockSummary};
use crate::scheduler::{schedule_every, schedule_once, ScheduledTask};
use crate::ui::{
    build_chart_config, detail, render_ticker_list, ticker_list, ChartInstance, ChartSurface,
    View,
};

/// État mutable du dashboard
///
/// Invariant : au plus un graphique et une tâche de rafraîchissement vivants
#[derive(Default)]
struct SelectionState {
    /// Ticker sélectionné (None tant que l'utilisateur n'a rien cliqué)
    current_symbol: Option<String>,

    /// Graphique affiché dans le panneau de détail
    chart: Option<Box<dyn ChartInstance>>,

    /// Rafraîchissement périodique du ticker sélectionné
    refresh: Option<ScheduledTask>,

    /// Recherche en attente (debounce)
    debounce: Option<ScheduledTask>,

    /// Génération de la dernière requête de liste (populaire ou recherche)
    list_generation: u64,

    /// Génération du dernier affichage de détail
    detail_generation: u64,
}

impl SelectionState {
    fn destroy_chart(&mut self) {
        if let Some(chart) = self.chart.take() {
            chart.destroy();
        }
    }
}

struct Inner {
    api: Arc<dyn FetchApi>,
    view: Arc<dyn View>,
    charts: Arc<dyn ChartSurface>,
    config: DashboardConfig,
    state: Mutex<SelectionState>,
}

/// Contrôleur du dashboard
///
/// Construit une fois au démarrage, arrêté avec shutdown(). Les clones
/// partagent le même état.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<Inner>,
}

impl Dashboard {
    pub fn new(
        api: Arc<dyn FetchApi>,
        view: Arc<dyn View>,
        charts: Arc<dyn ChartSurface>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                view,
                charts,
                config,
                state: Mutex::new(SelectionState::default()),
            }),
        }
    }

    /// Démarrage : affiche la liste populaire
    pub async fn start(&self) {
        info!(
            symbols = self.inner.config.popular_symbols.len(),
            "Dashboard starting"
        );
        self.inner.populate_popular().await;
    }

    /// Charge et affiche la liste populaire (avec défilement)
    pub async fn populate_popular(&self) {
        self.inner.populate_popular().await;
    }

    /// Saisie dans le champ de recherche
    ///
    /// - la recherche en attente est annulée
    /// - saisie vide : retour immédiat à la liste populaire (sans debounce)
    /// - sinon : recherche planifiée après le délai de debounce
    pub async fn on_search_input(&self, raw: &str) {
        self.inner.on_search_input(raw).await;
    }

    /// Recherche immédiate (action exécutée à la fin du debounce)
    pub async fn search(&self, term: &str) {
        self.inner.search(term).await;
    }

    /// Clic sur un ticker
    ///
    /// Retourne false si le ticker était déjà sélectionné (aucun effet).
    pub async fn select_ticker(&self, symbol: &str) -> bool {
        self.inner.select_ticker(symbol).await
    }

    /// Affiche (ou rafraîchit) le panneau de détail pour `symbol`
    pub async fn display_stock(&self, symbol: &str) {
        self.inner.display_stock(symbol).await;
    }

    pub fn current_symbol(&self) -> Option<String> {
        self.inner.lock().current_symbol.clone()
    }

    /// Vrai si une tâche de rafraîchissement est active
    pub fn is_refreshing(&self) -> bool {
        self.inner
            .lock()
            .refresh
            .as_ref()
            .is_some_and(ScheduledTask::is_active)
    }

    pub fn has_chart(&self) -> bool {
        self.inner.lock().chart.is_some()
    }

    /// Arrêt : annule les tâches, détruit le graphique, oublie la sélection
    ///
    /// Les réponses encore en vol seront ignorées (générations incrémentées).
    pub fn shutdown(&self) {
        let mut state = self.inner.lock();
        if let Some(task) = state.debounce.take() {
            task.dispose();
        }
        if let Some(task) = state.refresh.take() {
            task.dispose();
        }
        state.destroy_chart();
        state.current_symbol = None;
        state.list_generation += 1;
        state.detail_generation += 1;
        info!("Dashboard shut down");
    }
}

impl Inner {
    /// CONCEPT RUST : PoisonError::into_inner
    /// - un panic dans un autre thread ne doit pas bloquer l'interface
    /// - l'état reste cohérent : chaque section critique est courte
    fn lock(&self) -> MutexGuard<'_, SelectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_list_request(&self) -> u64 {
        let mut state = self.lock();
        state.list_generation += 1;
        state.list_generation
    }

    #[instrument(skip(self))]
    async fn populate_popular(&self) {
        let generation = self.begin_list_request();
        let endpoint = endpoints::quotes(&self.config.popular_symbols);

        let result = self.api.fetch(&endpoint).await;

        let state = self.lock();
        if state.list_generation != generation {
            debug!(generation, "Dropping stale popular list");
            return;
        }

        match result {
            Ok(value) => {
                let stocks = StockSummary::list_from_json(value);
                debug!(count = stocks.len(), "Rendering popular list");
                render_ticker_list(&stocks, true).apply(self.view.as_ref());
            }
            Err(e) => {
                error!(error = %e, "Failed to populate popular ticker");
                self.view.set_ticker_list(ticker_list::LOAD_FAILED);
            }
        }
        drop(state);
    }

    async fn on_search_input(self: &Arc<Self>, raw: &str) {
        let term = raw.trim().to_uppercase();

        let pending = self.lock().debounce.take();
        if let Some(task) = pending {
            task.dispose();
        }

        if term.is_empty() {
            self.populate_popular().await;
            return;
        }

        debug!(%term, "Scheduling search");
        let weak = Arc::downgrade(self);
        let task = schedule_once("search-debounce", self.config.debounce, async move {
            if let Some(inner) = weak.upgrade() {
                inner.search(&term).await;
            }
        });
        self.lock().debounce = Some(task);
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str) {
        let generation = {
            let mut state = self.lock();
            state.list_generation += 1;
            self.view.set_ticker_list(ticker_list::SEARCHING);
            self.view.set_ticker_scrolling(false);
            state.list_generation
        };

        let endpoint = endpoints::search(
            term,
            self.config.search_limit,
            &self.config.search_exchanges,
        );
        let result = self.api.fetch(&endpoint).await;

        let state = self.lock();
        if state.list_generation != generation {
            debug!(generation, "Dropping stale search results");
            return;
        }

        match result {
            Ok(value) => {
                let stocks = StockSummary::list_from_json(value);
                info!(results = stocks.len(), "Search completed");
                if stocks.is_empty() {
                    self.view.set_ticker_list(ticker_list::NO_RESULTS);
                } else {
                    render_ticker_list(&stocks, false).apply(self.view.as_ref());
                }
            }
            Err(e) => {
                error!(error = %e, "Search failed");
                self.view.set_ticker_list(ticker_list::SEARCH_FAILED);
            }
        }
        drop(state);
    }

    async fn select_ticker(self: &Arc<Self>, symbol: &str) -> bool {
        {
            let mut state = self.lock();
            if state.current_symbol.as_deref() == Some(symbol) {
                debug!(%symbol, "Ticker already selected");
                return false;
            }

            self.view.mark_selected(symbol);
            state.current_symbol = Some(symbol.to_string());

            // L'ancien rafraîchissement est annulé avant d'en créer un nouveau
            if let Some(previous) = state.refresh.take() {
                previous.dispose();
            }
            state.refresh = Some(self.schedule_refresh());
        }

        info!(%symbol, "Ticker selected");
        self.display_stock(symbol).await;
        true
    }

    /// Rafraîchit le ticker courant à chaque période
    fn schedule_refresh(self: &Arc<Self>) -> ScheduledTask {
        let weak: Weak<Self> = Arc::downgrade(self);
        schedule_every("stock-refresh", self.config.refresh_interval, move || {
            let weak = weak.clone();
            async move {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let symbol = inner.lock().current_symbol.clone();
                if let Some(symbol) = symbol {
                    debug!(%symbol, "Refreshing selected ticker");
                    inner.display_stock(&symbol).await;
                }
            }
        })
    }

    #[instrument(skip(self))]
    async fn display_stock(&self, symbol: &str) {
        let generation = {
            let mut state = self.lock();
            state.detail_generation += 1;
            self.view.show_detail_view();
            self.view.set_stock_header(&detail::render_loading_header(symbol));
            state.destroy_chart();
            self.view.set_stock_info(detail::FETCHING_DETAILS);
            state.detail_generation
        };

        let loaded = self.load_detail(symbol).await;

        let mut state = self.lock();
        if state.detail_generation != generation {
            debug!(generation, "Dropping stale detail response");
            return;
        }

        let outcome = loaded.and_then(|stock| self.render_detail(&mut state, &stock));
        match outcome {
            Ok(()) => info!("Stock details displayed"),
            Err(e) => {
                error!(error = %e, "Error displaying stock data");
                self.view.set_stock_header(&detail::render_error_header(symbol));
                self.view.set_stock_info(&detail::render_error_message(&e.to_string()));
            }
        }
    }

    /// Lance les trois requêtes ensemble et attend les trois
    async fn load_detail(&self, symbol: &str) -> Result<StockDetail, DisplayError> {
        let quote_endpoint = endpoints::quote(symbol);
        let profile_endpoint = endpoints::profile(symbol);
        let history_endpoint = endpoints::historical(symbol, self.config.history_days);

        let (quote, profile, history) = tokio::try_join!(
            self.api.fetch(&quote_endpoint),
            self.api.fetch(&profile_endpoint),
            self.api.fetch(&history_endpoint),
        )?;

        StockDetail::from_responses(symbol, quote, profile, history)
    }

    fn render_detail(
        &self,
        state: &mut SelectionState,
        stock: &StockDetail,
    ) -> Result<(), DisplayError> {
        self.view
            .set_stock_header(&detail::render_header(&stock.quote, &stock.profile));
        self.view
            .set_stock_info(&detail::render_info(&stock.quote, &stock.profile));

        state.destroy_chart();
        let config = build_chart_config(&stock.history, stock.quote.is_positive());
        state.chart = Some(self.charts.create_chart(&config)?);
        debug!(points = stock.history.len(), "Chart rendered");
        Ok(())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
// Faux collaborateurs en mémoire : API, vue, surface graphique.
// Les tests de timing utilisent l'horloge tokio en pause (start_paused) :
// les sleep avancent le temps virtuel instantanément.
// ============================================================================
